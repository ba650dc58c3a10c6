pub mod controller;
pub mod deep_link;
pub mod directions;
pub mod geocoding;
pub mod renderer;

pub use crate::domain::model::{Coordinate, DeepLinkEvent, NavigationRequest, Route};
pub use crate::domain::ports::{DirectionsClient, Geocoder, MapHost, MapSurface};
pub use crate::utils::error::Result;
