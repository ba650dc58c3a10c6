use crate::domain::model::{AvoidType, Direction, RouteQuery};
use crate::domain::ports::DirectionsClient;
use crate::utils::error::{Result, RouteError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_DIRECTIONS_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/directions/json";

/// Directions client for the Google Directions web service.
pub struct GoogleDirectionsClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleDirectionsClient {
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

    pub fn request_url(&self, query: &RouteQuery) -> Result<Url> {
        let mut params = vec![
            ("origin", query.source.to_query_value()),
            ("destination", query.destination.to_query_value()),
        ];
        if !query.avoid.is_empty() {
            params.push(("avoid", AvoidType::join(&query.avoid)));
        }
        params.push(("key", self.api_key.clone()));

        Ok(Url::parse_with_params(&self.endpoint, &params)?)
    }
}

#[async_trait]
impl DirectionsClient for GoogleDirectionsClient {
    async fn fetch_direction(&self, query: &RouteQuery) -> Result<Direction> {
        let url = self.request_url(query)?;
        tracing::debug!("Making directions request to: {}", self.endpoint);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Directions response status: {}", status);
        if !status.is_success() {
            return Err(RouteError::DirectionHttpStatus {
                status: status.as_u16(),
            });
        }

        let direction: Direction = response.json().await?;
        if let Some(message) = &direction.error_message {
            tracing::debug!("Directions service message: {}", message);
        }
        Ok(direction)
    }
}
