use anyhow::Result;
use deeplink_route::adapters::{GoogleDirectionsClient, GoogleGeocoder, HeadlessMapHost};
use deeplink_route::core::controller::DeepLinkRouteController;
use deeplink_route::domain::model::{CameraUpdate, Coordinate, DeepLinkEvent, MapCommand};
use deeplink_route::AppConfig;
use httpmock::prelude::*;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn geocode_body(name: &str, lat: f64, lng: f64) -> serde_json::Value {
    serde_json::json!({
        "status": "OK",
        "results": [{
            "formatted_address": name,
            "geometry": {"location": {"lat": lat, "lng": lng}}
        }]
    })
}

/// 完整流程：deep link → Google geocoding → Google directions → 地圖指令
#[tokio::test]
async fn test_deep_link_over_http_services() -> Result<()> {
    let server = MockServer::start();

    let seattle_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/geocode/json")
            .query_param("address", "Seattle")
            .query_param("key", "test-key");
        then.status(200)
            .json_body(geocode_body("Seattle, WA, USA", 47.6062, -122.3321));
    });
    let portland_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/geocode/json")
            .query_param("address", "Portland")
            .query_param("key", "test-key");
        then.status(200)
            .json_body(geocode_body("Portland, OR, USA", 45.5152, -122.6784));
    });
    let directions_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/directions/json")
            .query_param("origin", "47.6062,-122.3321")
            .query_param("destination", "45.5152,-122.6784")
            .query_param("avoid", "tolls|ferries|highways")
            .query_param("key", "test-key");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "routes": [{
                "bounds": {
                    "northeast": {"lat": 47.6062, "lng": -122.3321},
                    "southwest": {"lat": 45.5152, "lng": -122.6784}
                },
                "legs": [{
                    "start_location": {"lat": 47.6062, "lng": -122.3321},
                    "end_location": {"lat": 45.5152, "lng": -122.6784},
                    "steps": [{
                        "start_location": {"lat": 38.5, "lng": -120.2},
                        "end_location": {"lat": 43.252, "lng": -126.453},
                        "polyline": {"points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@"}
                    }]
                }]
            }]
        }));
    });

    let mut config_file = NamedTempFile::new()?;
    write!(
        config_file,
        r#"
[directions]
endpoint = "{}"
api_key = "test-key"

[geocoding]
endpoint = "{}"
max_results = 1
"#,
        server.url("/directions/json"),
        server.url("/geocode/json")
    )?;
    let config = AppConfig::from_file(config_file.path())?;
    tokio_test::assert_ok!(config.validate_config());

    let geocoder = GoogleGeocoder::new(&config.geocoding.endpoint, config.geocoding_api_key()?);
    let directions =
        GoogleDirectionsClient::new(&config.directions.endpoint, config.directions_api_key()?);
    let mut controller = DeepLinkRouteController::new(
        Arc::new(geocoder),
        Arc::new(directions),
        config.controller_settings(),
    );

    let host = HeadlessMapHost::default();
    controller.on_create(Some(&host));
    controller.handle().new_intent(Some(DeepLinkEvent::view(
        "routedemo://navigate?origin=Seattle&dest=Portland",
    )));
    controller.run_until_idle().await;

    seattle_mock.assert();
    portland_mock.assert();
    directions_mock.assert();

    let commands = host.surface().commands();
    assert_eq!(commands.len(), 5);
    assert_eq!(commands[0], MapCommand::ZoomControls { enabled: true });

    let markers = host.surface().markers();
    assert_eq!(markers[0].position, Coordinate::new(47.6062, -122.3321));
    assert_eq!(markers[1].position, Coordinate::new(45.5152, -122.6784));

    let polylines = host.surface().polylines();
    assert_eq!(polylines.len(), 1);
    assert_eq!(polylines[0].points.len(), 3);

    match &host.surface().camera_updates()[..] {
        [CameraUpdate::FitBounds { bounds, padding }] => {
            assert_eq!(*padding, 100);
            assert_eq!(bounds.northeast, Coordinate::new(47.6062, -122.3321));
        }
        other => panic!("unexpected camera updates: {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_zero_results_geocoding_skips_directions() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/geocode/json");
        then.status(200)
            .json_body(serde_json::json!({"status": "ZERO_RESULTS", "results": []}));
    });
    let directions_mock = server.mock(|when, then| {
        when.method(GET).path("/directions/json");
        then.status(200)
            .json_body(serde_json::json!({"status": "OK", "routes": []}));
    });

    let mut controller = DeepLinkRouteController::new(
        Arc::new(GoogleGeocoder::new(server.url("/geocode/json"), "k")),
        Arc::new(GoogleDirectionsClient::new(server.url("/directions/json"), "k")),
        Default::default(),
    );
    let host = HeadlessMapHost::default();
    controller.on_create(Some(&host));
    controller.handle().new_intent(Some(DeepLinkEvent::view(
        "routedemo://navigate?origin=Nowhere&dest=Portland",
    )));
    controller.run_until_idle().await;

    directions_mock.assert_hits(0);
    assert_eq!(host.surface().commands().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_directions_server_error_renders_nothing() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/geocode/json");
        then.status(200)
            .json_body(geocode_body("Anywhere", 10.0, 20.0));
    });
    let directions_mock = server.mock(|when, then| {
        when.method(GET).path("/directions/json");
        then.status(500);
    });

    let mut controller = DeepLinkRouteController::new(
        Arc::new(GoogleGeocoder::new(server.url("/geocode/json"), "k")),
        Arc::new(GoogleDirectionsClient::new(server.url("/directions/json"), "k")),
        Default::default(),
    );
    let host = HeadlessMapHost::default();
    controller.on_create(Some(&host));
    controller.handle().new_intent(Some(DeepLinkEvent::view(
        "routedemo://navigate?origin=A&dest=B",
    )));
    controller.run_until_idle().await;

    directions_mock.assert();
    assert!(controller.is_idle());
    assert!(host.surface().markers().is_empty());

    Ok(())
}
