use crate::core::deep_link::parse_deep_link;
use crate::core::directions::{extract_route, RequestTask, RouteRequester};
use crate::core::geocoding::{GeocodingResolver, DEFAULT_MAX_RESULTS};
use crate::core::renderer::{RenderStyle, RouteRenderer};
use crate::domain::model::{
    AvoidType, DeepLinkEvent, Direction, NavigationRequest, Route, RouteEndpoints,
};
use crate::domain::ports::{DirectionsClient, Geocoder, MapHost, MapReadySignal, MapSurface};
use crate::utils::error::{Result, RouteError};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Everything that reaches the controller arrives as one of these, on one
/// loop.
pub enum ControllerEvent {
    MapReady(Box<dyn MapSurface>),
    NewIntent(Option<DeepLinkEvent>),
    DirectionResult {
        ticket: u64,
        endpoints: RouteEndpoints,
        outcome: Result<Direction>,
    },
    Shutdown,
}

/// 對 controller 送事件的入口，可複製給外部使用
#[derive(Clone)]
pub struct ControllerHandle {
    events: UnboundedSender<ControllerEvent>,
}

impl ControllerHandle {
    pub fn new_intent(&self, event: Option<DeepLinkEvent>) -> bool {
        self.events.send(ControllerEvent::NewIntent(event)).is_ok()
    }

    pub fn map_ready(&self, surface: Box<dyn MapSurface>) -> bool {
        self.events.send(ControllerEvent::MapReady(surface)).is_ok()
    }

    pub fn shutdown(&self) -> bool {
        self.events.send(ControllerEvent::Shutdown).is_ok()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Later requests wait until the in-flight one has finished.
    #[default]
    Queue,
    /// A new request aborts the in-flight one.
    Replace,
}

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub max_results: usize,
    pub avoid: Vec<AvoidType>,
    pub style: RenderStyle,
    pub buffer_until_map_ready: bool,
    pub overlap_policy: OverlapPolicy,
    pub max_queued_requests: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            avoid: AvoidType::default_set(),
            style: RenderStyle::default(),
            buffer_until_map_ready: true,
            overlap_policy: OverlapPolicy::Queue,
            max_queued_requests: 4,
        }
    }
}

struct InFlight {
    ticket: u64,
    task: RequestTask,
}

pub struct DeepLinkRouteController {
    resolver: GeocodingResolver,
    requester: RouteRequester,
    renderer: RouteRenderer,
    settings: ControllerSettings,
    map: Option<Box<dyn MapSurface>>,
    pending_link: Option<NavigationRequest>,
    in_flight: Option<InFlight>,
    queued: VecDeque<RouteEndpoints>,
    next_ticket: u64,
    events_tx: UnboundedSender<ControllerEvent>,
    events_rx: UnboundedReceiver<ControllerEvent>,
}

impl DeepLinkRouteController {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        directions: Arc<dyn DirectionsClient>,
        settings: ControllerSettings,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            resolver: GeocodingResolver::new(geocoder, settings.max_results),
            requester: RouteRequester::new(directions, settings.avoid.clone()),
            renderer: RouteRenderer::new(settings.style),
            settings,
            map: None,
            pending_link: None,
            in_flight: None,
            queued: VecDeque::new(),
            next_ticket: 1,
            events_tx,
            events_rx,
        }
    }

    pub fn handle(&self) -> ControllerHandle {
        ControllerHandle {
            events: self.events_tx.clone(),
        }
    }

    pub fn is_map_ready(&self) -> bool {
        self.map.is_some()
    }

    /// Nothing in flight and nothing queued.
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.queued.is_empty()
    }

    pub fn pending_link(&self) -> Option<&NavigationRequest> {
        self.pending_link.as_ref()
    }

    pub fn queued_requests(&self) -> usize {
        self.queued.len()
    }

    /// 畫面建立時向 host 非同步要求地圖
    pub fn on_create(&self, host: Option<&dyn MapHost>) {
        match host {
            Some(host) => {
                let handle = self.handle();
                host.request_map(MapReadySignal::new(move |surface| {
                    if !handle.map_ready(surface) {
                        tracing::warn!("Map became ready after the controller shut down");
                    }
                }));
            }
            None => tracing::warn!("No map host available, routes will not be rendered"),
        }
    }

    pub async fn on_map_ready(&mut self, mut surface: Box<dyn MapSurface>) {
        tracing::info!("Map surface ready");
        surface.set_zoom_controls_enabled(true);
        self.map = Some(surface);

        if let Some(request) = self.pending_link.take() {
            tracing::info!(
                "Replaying deep link received before map readiness: {} -> {}",
                request.origin_name,
                request.destination_name
            );
            self.handle_navigation(request).await;
        }
    }

    pub async fn on_new_intent(&mut self, event: Option<DeepLinkEvent>) {
        let Some(event) = event else {
            tracing::debug!("New intent without payload, ignoring");
            return;
        };
        tracing::info!("New intent, action => {}", event.action);

        match parse_deep_link(&event) {
            Ok(request) => self.handle_navigation(request).await,
            Err(RouteError::NotViewAction { action }) => {
                tracing::debug!("Action {} is not a deep link, showing default view", action);
            }
            Err(e) => {
                tracing::warn!("❌ Deep link ignored: {} (Category: {:?})", e, e.category());
            }
        }
    }

    async fn handle_navigation(&mut self, request: NavigationRequest) {
        if self.map.is_none() {
            if self.settings.buffer_until_map_ready {
                if let Some(previous) = self.pending_link.replace(request) {
                    tracing::info!(
                        "Map not ready, replacing buffered deep link {} -> {}",
                        previous.origin_name,
                        previous.destination_name
                    );
                } else {
                    tracing::info!("Map not ready, buffering deep link");
                }
            } else {
                tracing::warn!(
                    "Map not ready, dropping deep link {} -> {}",
                    request.origin_name,
                    request.destination_name
                );
            }
            return;
        }

        match self.resolve_endpoints(&request).await {
            Ok(endpoints) => self.submit(endpoints),
            Err(e) => {
                tracing::warn!("❌ Route aborted: {} (Category: {:?})", e, e.category());
            }
        }
    }

    async fn resolve_endpoints(&self, request: &NavigationRequest) -> Result<RouteEndpoints> {
        let source = self
            .resolver
            .resolve_first(&request.origin_name)
            .await
            .ok_or_else(|| RouteError::NoCoordinate {
                place: request.origin_name.clone(),
            })?;
        let destination = self
            .resolver
            .resolve_first(&request.destination_name)
            .await
            .ok_or_else(|| RouteError::NoCoordinate {
                place: request.destination_name.clone(),
            })?;

        Ok(RouteEndpoints {
            source,
            destination,
        })
    }

    fn submit(&mut self, endpoints: RouteEndpoints) {
        let Some(current) = self.in_flight.as_ref() else {
            self.dispatch(endpoints);
            return;
        };

        match self.settings.overlap_policy {
            OverlapPolicy::Queue => {
                if self.queued.len() >= self.settings.max_queued_requests {
                    tracing::warn!(
                        "Route queue full ({} waiting), dropping request {} -> {}",
                        self.queued.len(),
                        endpoints.source,
                        endpoints.destination
                    );
                } else {
                    tracing::debug!("Route request #{} in flight, queueing", current.ticket);
                    self.queued.push_back(endpoints);
                }
            }
            OverlapPolicy::Replace => {
                tracing::info!("Replacing in-flight route request #{}", current.ticket);
                if let Some(previous) = self.in_flight.take() {
                    previous.task.abort();
                }
                self.dispatch(endpoints);
            }
        }
    }

    fn dispatch(&mut self, endpoints: RouteEndpoints) {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        tracing::info!(
            "Requesting fastest route #{}: {} -> {}",
            ticket,
            endpoints.source,
            endpoints.destination
        );
        let task = self
            .requester
            .dispatch(ticket, endpoints, self.events_tx.clone());
        self.in_flight = Some(InFlight { ticket, task });
    }

    pub fn on_direction_result(
        &mut self,
        ticket: u64,
        endpoints: RouteEndpoints,
        outcome: Result<Direction>,
    ) {
        let is_current = self
            .in_flight
            .as_ref()
            .is_some_and(|current| current.ticket == ticket);
        if !is_current {
            tracing::debug!("Stale direction result #{}, ignoring", ticket);
            return;
        }
        self.in_flight = None;

        match outcome {
            Ok(direction) => {
                tracing::info!("Direction result #{} status {}", ticket, direction.status);
                match extract_route(&direction) {
                    Ok(route) => self.render_route(&route, endpoints),
                    Err(e) => {
                        tracing::info!("No route to render: {} (Category: {:?})", e, e.category());
                    }
                }
            }
            Err(e) => {
                tracing::warn!("❌ Direction failure: {} (Category: {:?})", e, e.category());
            }
        }

        if let Some(next) = self.queued.pop_front() {
            self.dispatch(next);
        }
    }

    fn render_route(&mut self, route: &Route, endpoints: RouteEndpoints) {
        match self.map.as_deref_mut() {
            Some(map) => {
                self.renderer
                    .render(map, route, endpoints.source, endpoints.destination);
                tracing::info!("✅ Route rendered with {} points", route.points.len());
            }
            None => {
                let e = RouteError::MapUnavailable;
                tracing::warn!("❌ {} (Category: {:?})", e, e.category());
            }
        }
    }

    /// Returns `false` once the controller should stop.
    pub async fn handle_event(&mut self, event: ControllerEvent) -> bool {
        match event {
            ControllerEvent::MapReady(surface) => self.on_map_ready(surface).await,
            ControllerEvent::NewIntent(intent) => self.on_new_intent(intent).await,
            ControllerEvent::DirectionResult {
                ticket,
                endpoints,
                outcome,
            } => self.on_direction_result(ticket, endpoints, outcome),
            ControllerEvent::Shutdown => {
                self.abort_in_flight();
                return false;
            }
        }
        true
    }

    pub async fn run(mut self) {
        while let Some(event) = self.events_rx.recv().await {
            if !self.handle_event(event).await {
                break;
            }
        }
        tracing::debug!("Controller loop finished");
    }

    /// 處理所有已送達的事件，直到沒有進行中或排隊中的路線請求
    pub async fn run_until_idle(&mut self) {
        loop {
            while let Ok(event) = self.events_rx.try_recv() {
                if !self.handle_event(event).await {
                    return;
                }
            }
            if self.is_idle() {
                return;
            }
            match self.events_rx.recv().await {
                Some(event) => {
                    if !self.handle_event(event).await {
                        return;
                    }
                }
                None => return,
            }
        }
    }

    fn abort_in_flight(&mut self) {
        if let Some(current) = self.in_flight.take() {
            tracing::debug!("Aborting route request #{}", current.ticket);
            current.task.abort();
        }
        self.queued.clear();
    }
}

impl Drop for DeepLinkRouteController {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}
