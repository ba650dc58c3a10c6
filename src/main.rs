use anyhow::Context;
use clap::Parser;
use deeplink_route::utils::{logger, validation::Validate};
use deeplink_route::{
    AppConfig, CliConfig, DeepLinkEvent, DeepLinkRouteController, GoogleDirectionsClient,
    GoogleGeocoder, HeadlessMapHost, IntentAction, RecordingMapSurface,
};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting deeplink-route");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        None => AppConfig::default(),
    };
    if let Some(key) = &cli.api_key {
        config.directions.api_key = Some(key.clone());
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let geocoding_key = config.geocoding_api_key()?.to_string();
    let directions_key = config.directions_api_key()?.to_string();
    let (geocoder, directions) = match config.request_timeout() {
        Some(timeout) => (
            GoogleGeocoder::with_timeout(&config.geocoding.endpoint, geocoding_key, timeout)?,
            GoogleDirectionsClient::with_timeout(&config.directions.endpoint, directions_key, timeout)?,
        ),
        None => (
            GoogleGeocoder::new(&config.geocoding.endpoint, geocoding_key),
            GoogleDirectionsClient::new(&config.directions.endpoint, directions_key),
        ),
    };

    let mut controller = DeepLinkRouteController::new(
        Arc::new(geocoder),
        Arc::new(directions),
        config.controller_settings(),
    );

    let surface = RecordingMapSurface::new();
    let host = HeadlessMapHost::new(surface.clone());
    controller.on_create(Some(&host));

    let action: IntentAction = cli.action.parse()?;
    controller
        .handle()
        .new_intent(Some(DeepLinkEvent::new(action, cli.uri.clone())));
    controller.run_until_idle().await;

    let commands = surface.commands();
    tracing::info!("📍 {} map command(s) issued", commands.len());
    println!("{}", serde_json::to_string_pretty(&commands)?);

    Ok(())
}
