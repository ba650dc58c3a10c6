pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{GoogleDirectionsClient, GoogleGeocoder, HeadlessMapHost, RecordingMapSurface};
pub use config::AppConfig;
pub use crate::core::controller::{
    ControllerEvent, ControllerHandle, ControllerSettings, DeepLinkRouteController, OverlapPolicy,
};
pub use domain::model::{Coordinate, DeepLinkEvent, IntentAction, MapCommand, NavigationRequest};
pub use utils::error::{Result, RouteError};
