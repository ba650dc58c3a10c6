use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Deep link ignored: action {action} is not a view action")]
    NotViewAction { action: String },

    #[error("Deep link has no URI")]
    MissingUri,

    #[error("Deep link URI is invalid: {uri}")]
    InvalidUri { uri: String },

    #[error("Deep link is missing query parameter '{name}'")]
    MissingParameter { name: String },

    #[error("Geocoding failed for '{place}': {message}")]
    GeocodingError { place: String, message: String },

    #[error("No coordinate found for '{place}'")]
    NoCoordinate { place: String },

    #[error("Directions service returned status {status}")]
    DirectionStatusError { status: String },

    #[error("Directions service returned status {status} (HTTP)")]
    DirectionHttpStatus { status: u16 },

    #[error("Route request task failed: {message}")]
    DirectionTaskFailed { message: String },

    #[error("Malformed direction result: {message}")]
    MalformedDirection { message: String },

    #[error("Polyline decoding failed at byte {position}")]
    PolylineError { position: usize },

    #[error("Invalid bounds: southwest latitude {south} is north of {north}")]
    InvalidBounds { south: f64, north: f64 },

    #[error("Map surface is not ready")]
    MapUnavailable,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    DeepLink,
    Geocoding,
    Directions,
    Rendering,
    Configuration,
    Transport,
}

impl RouteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RouteError::NotViewAction { .. }
            | RouteError::MissingUri
            | RouteError::InvalidUri { .. }
            | RouteError::MissingParameter { .. } => ErrorCategory::DeepLink,
            RouteError::GeocodingError { .. } | RouteError::NoCoordinate { .. } => {
                ErrorCategory::Geocoding
            }
            RouteError::DirectionStatusError { .. }
            | RouteError::DirectionHttpStatus { .. }
            | RouteError::DirectionTaskFailed { .. }
            | RouteError::MalformedDirection { .. }
            | RouteError::PolylineError { .. }
            | RouteError::InvalidBounds { .. } => ErrorCategory::Directions,
            RouteError::MapUnavailable => ErrorCategory::Rendering,
            RouteError::ConfigError { .. }
            | RouteError::InvalidConfigValueError { .. }
            | RouteError::MissingConfigError { .. } => ErrorCategory::Configuration,
            RouteError::HttpError(_)
            | RouteError::UrlError(_)
            | RouteError::IoError(_)
            | RouteError::SerializationError(_) => ErrorCategory::Transport,
        }
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;
