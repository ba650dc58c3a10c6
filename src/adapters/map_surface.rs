use crate::domain::model::{CameraUpdate, MapCommand, MarkerOptions, PolylineOptions};
use crate::domain::ports::{MapHost, MapReadySignal, MapSurface};
use std::sync::{Arc, Mutex};

/// Map surface that keeps every command it receives. Clones share the same
/// log, so a copy can be inspected after the original was handed over.
#[derive(Debug, Clone, Default)]
pub struct RecordingMapSurface {
    commands: Arc<Mutex<Vec<MapCommand>>>,
}

impl RecordingMapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<MapCommand> {
        self.commands
            .lock()
            .map(|commands| commands.clone())
            .unwrap_or_default()
    }

    pub fn markers(&self) -> Vec<MarkerOptions> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                MapCommand::Marker(marker) => Some(marker),
                _ => None,
            })
            .collect()
    }

    pub fn polylines(&self) -> Vec<PolylineOptions> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                MapCommand::Polyline(polyline) => Some(polyline),
                _ => None,
            })
            .collect()
    }

    pub fn camera_updates(&self) -> Vec<CameraUpdate> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                MapCommand::Camera(update) => Some(update),
                _ => None,
            })
            .collect()
    }

    fn record(&self, command: MapCommand) {
        tracing::debug!("Map command: {:?}", command);
        if let Ok(mut commands) = self.commands.lock() {
            commands.push(command);
        }
    }
}

impl MapSurface for RecordingMapSurface {
    fn set_zoom_controls_enabled(&mut self, enabled: bool) {
        self.record(MapCommand::ZoomControls { enabled });
    }

    fn add_marker(&mut self, marker: MarkerOptions) {
        self.record(MapCommand::Marker(marker));
    }

    fn add_polyline(&mut self, polyline: PolylineOptions) {
        self.record(MapCommand::Polyline(polyline));
    }

    fn animate_camera(&mut self, update: CameraUpdate) {
        self.record(MapCommand::Camera(update));
    }
}

/// 沒有實體畫面的 host，一收到請求就回報地圖就緒
#[derive(Debug, Clone, Default)]
pub struct HeadlessMapHost {
    surface: RecordingMapSurface,
}

impl HeadlessMapHost {
    pub fn new(surface: RecordingMapSurface) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &RecordingMapSurface {
        &self.surface
    }
}

impl MapHost for HeadlessMapHost {
    fn request_map(&self, ready: MapReadySignal) {
        ready.ready(self.surface.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Coordinate;

    #[test]
    fn test_clones_share_the_command_log() {
        let surface = RecordingMapSurface::new();
        let mut handed_over = surface.clone();

        handed_over.set_zoom_controls_enabled(true);
        handed_over.add_marker(MarkerOptions {
            position: Coordinate::new(1.0, 2.0),
        });

        assert_eq!(surface.commands().len(), 2);
        assert_eq!(surface.markers().len(), 1);
        assert!(surface.polylines().is_empty());
    }

    #[test]
    fn test_commands_serialize_with_tags() {
        let surface = RecordingMapSurface::new();
        let mut handed_over = surface.clone();
        handed_over.add_marker(MarkerOptions {
            position: Coordinate::new(47.6, -122.3),
        });

        let json = serde_json::to_value(surface.commands()).unwrap();
        assert_eq!(json[0]["command"], "marker");
        assert_eq!(json[0]["position"]["latitude"], 47.6);
    }
}
