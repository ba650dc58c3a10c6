pub mod error;
pub mod logger;
pub mod polyline;
pub mod validation;
