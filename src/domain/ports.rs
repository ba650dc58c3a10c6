use crate::domain::model::{Address, CameraUpdate, Direction, MarkerOptions, PolylineOptions, RouteQuery};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Records come back in the service's own relevance order.
    async fn from_location_name(&self, location: &str, max_results: usize) -> Result<Vec<Address>>;
}

#[async_trait]
pub trait DirectionsClient: Send + Sync {
    async fn fetch_direction(&self, query: &RouteQuery) -> Result<Direction>;
}

pub trait MapSurface: Send {
    fn set_zoom_controls_enabled(&mut self, enabled: bool);
    fn add_marker(&mut self, marker: MarkerOptions);
    fn add_polyline(&mut self, polyline: PolylineOptions);
    fn animate_camera(&mut self, update: CameraUpdate);
}

pub trait MapHost {
    /// Hands the surface back through `ready` once it exists. A host without
    /// a map may drop the signal.
    fn request_map(&self, ready: MapReadySignal);
}

/// One-shot readiness callback handed to a `MapHost`.
pub struct MapReadySignal {
    deliver: Box<dyn FnOnce(Box<dyn MapSurface>) + Send>,
}

impl MapReadySignal {
    pub fn new<F>(deliver: F) -> Self
    where
        F: FnOnce(Box<dyn MapSurface>) + Send + 'static,
    {
        Self {
            deliver: Box::new(deliver),
        }
    }

    pub fn ready<M: MapSurface + 'static>(self, surface: M) {
        (self.deliver)(Box::new(surface));
    }
}
