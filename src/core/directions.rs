use crate::core::controller::ControllerEvent;
use crate::domain::model::{AvoidType, Bounds, Direction, Route, RouteEndpoints, RouteQuery};
use crate::domain::ports::DirectionsClient;
use crate::utils::error::{Result, RouteError};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::{AbortHandle, JoinHandle};

#[derive(Clone)]
pub struct RouteRequester {
    client: Arc<dyn DirectionsClient>,
    avoid: Vec<AvoidType>,
}

impl RouteRequester {
    pub fn new(client: Arc<dyn DirectionsClient>, avoid: Vec<AvoidType>) -> Self {
        Self { client, avoid }
    }

    pub fn query(&self, endpoints: RouteEndpoints) -> RouteQuery {
        RouteQuery {
            source: endpoints.source,
            destination: endpoints.destination,
            avoid: self.avoid.clone(),
        }
    }

    pub async fn request(&self, endpoints: RouteEndpoints) -> Result<Direction> {
        let query = self.query(endpoints);
        tracing::debug!(
            "Requesting fastest route {} -> {} avoiding {}",
            query.source,
            query.destination,
            AvoidType::join(&query.avoid)
        );
        self.client.fetch_direction(&query).await
    }

    /// Runs the request on its own task and posts exactly one
    /// `DirectionResult` back to the controller. A request that panics is
    /// reported as an error; one that was aborted posts nothing.
    pub fn dispatch(
        &self,
        ticket: u64,
        endpoints: RouteEndpoints,
        events: UnboundedSender<ControllerEvent>,
    ) -> RequestTask {
        let requester = self.clone();
        let request = tokio::spawn(async move { requester.request(endpoints).await });
        let abort = request.abort_handle();

        let reporter = tokio::spawn(async move {
            let outcome = match request.await {
                Ok(outcome) => outcome,
                Err(e) if e.is_cancelled() => {
                    tracing::debug!("Route request #{} aborted", ticket);
                    return;
                }
                Err(e) => Err(RouteError::DirectionTaskFailed {
                    message: e.to_string(),
                }),
            };
            if events
                .send(ControllerEvent::DirectionResult {
                    ticket,
                    endpoints,
                    outcome,
                })
                .is_err()
            {
                tracing::debug!("Controller gone, dropping direction result #{}", ticket);
            }
        });

        RequestTask { reporter, abort }
    }
}

/// Handle on a dispatched route request.
pub struct RequestTask {
    reporter: JoinHandle<()>,
    abort: AbortHandle,
}

impl RequestTask {
    pub fn abort(&self) {
        self.abort.abort();
    }

    /// Waits until the result has been posted (or dropped).
    pub async fn join(self) {
        if let Err(e) = self.reporter.await {
            tracing::debug!("Route reporter task ended abnormally: {}", e);
        }
    }
}

/// 從成功的回應取出第一條路線第一段的點與邊界
pub fn extract_route(direction: &Direction) -> Result<Route> {
    if !direction.is_ok() {
        return Err(RouteError::DirectionStatusError {
            status: direction.status.to_string(),
        });
    }

    let first = direction
        .routes
        .first()
        .ok_or_else(|| RouteError::MalformedDirection {
            message: "status OK but no routes".to_string(),
        })?;
    let leg = first
        .legs
        .first()
        .ok_or_else(|| RouteError::MalformedDirection {
            message: "route has no legs".to_string(),
        })?;

    let points = leg.direction_points()?;
    let bounds = Bounds::new(first.bounds.southwest.into(), first.bounds.northeast.into())?;

    Ok(Route { points, bounds })
}
