use crate::domain::model::Coordinate;
use crate::domain::ports::Geocoder;
use std::sync::Arc;

pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Turns place names into coordinates. Failures and empty answers look the
/// same to the caller: an empty list.
#[derive(Clone)]
pub struct GeocodingResolver {
    geocoder: Arc<dyn Geocoder>,
    max_results: usize,
}

impl GeocodingResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, max_results: usize) -> Self {
        Self {
            geocoder,
            max_results: max_results.max(1),
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub async fn resolve(&self, location: &str) -> Vec<Coordinate> {
        tracing::debug!("Resolving '{}' (max {} results)", location, self.max_results);

        match self
            .geocoder
            .from_location_name(location, self.max_results)
            .await
        {
            Ok(addresses) => {
                let coordinates: Vec<Coordinate> = addresses
                    .iter()
                    .filter_map(|address| address.coordinate())
                    .collect();
                tracing::debug!(
                    "'{}' resolved to {} coordinate(s) from {} address(es)",
                    location,
                    coordinates.len(),
                    addresses.len()
                );
                coordinates
            }
            Err(e) => {
                tracing::warn!(
                    "Error occurred when fetching latitude longitude for '{}': {} (Category: {:?})",
                    location,
                    e,
                    e.category()
                );
                Vec::new()
            }
        }
    }

    /// 只取第一個（最相關的）結果
    pub async fn resolve_first(&self, location: &str) -> Option<Coordinate> {
        self.resolve(location).await.into_iter().next()
    }
}
