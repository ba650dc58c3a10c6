use crate::domain::model::{Address, LatLngLiteral};
use crate::domain::ports::Geocoder;
use crate::utils::error::{Result, RouteError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_GEOCODING_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(default)]
    location: Option<LatLngLiteral>,
}

impl From<GeocodeResult> for Address {
    fn from(result: GeocodeResult) -> Self {
        let location = result.geometry.and_then(|g| g.location);
        Address {
            formatted_address: result.formatted_address,
            latitude: location.map(|l| l.lat),
            longitude: location.map(|l| l.lng),
        }
    }
}

/// Geocoder backed by the Google Geocoding web service.
pub struct GoogleGeocoder {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    fn request_url(&self, location: &str) -> Result<Url> {
        Ok(Url::parse_with_params(
            &self.endpoint,
            &[("address", location), ("key", self.api_key.as_str())],
        )?)
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn from_location_name(&self, location: &str, max_results: usize) -> Result<Vec<Address>> {
        let url = self.request_url(location)?;
        tracing::debug!("Geocoding '{}' via {}", location, self.endpoint);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Geocoding response status: {}", status);
        if !status.is_success() {
            return Err(RouteError::GeocodingError {
                place: location.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let body: GeocodeResponse = response.json().await?;
        match body.status.as_str() {
            "OK" => Ok(body
                .results
                .into_iter()
                .take(max_results)
                .map(Address::from)
                .collect()),
            "ZERO_RESULTS" => Ok(Vec::new()),
            other => Err(RouteError::GeocodingError {
                place: location.to_string(),
                message: match body.error_message {
                    Some(message) => format!("{}: {}", other, message),
                    None => other.to_string(),
                },
            }),
        }
    }
}
