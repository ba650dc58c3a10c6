// Adapters layer: concrete implementations of the domain ports.

pub mod google_directions;
pub mod google_geocoder;
pub mod map_surface;

pub use google_directions::GoogleDirectionsClient;
pub use google_geocoder::GoogleGeocoder;
pub use map_surface::{HeadlessMapHost, RecordingMapSurface};
