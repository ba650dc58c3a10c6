use crate::domain::model::{
    CameraUpdate, Color, Coordinate, MarkerOptions, PolylineOptions, Route,
};
use crate::domain::ports::MapSurface;

pub const DEFAULT_STROKE_WIDTH: f32 = 4.0;
pub const DEFAULT_CAMERA_PADDING: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub stroke_width: f32,
    pub color: Color,
    pub camera_padding: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            color: Color::RED,
            camera_padding: DEFAULT_CAMERA_PADDING,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteRenderer {
    style: RenderStyle,
}

impl RouteRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Markers first, then the polyline, then the camera.
    pub fn render(
        &self,
        map: &mut dyn MapSurface,
        route: &Route,
        source: Coordinate,
        destination: Coordinate,
    ) {
        map.add_marker(MarkerOptions { position: source });
        map.add_marker(MarkerOptions {
            position: destination,
        });
        map.add_polyline(PolylineOptions {
            points: route.points.clone(),
            width: self.style.stroke_width,
            color: self.style.color,
        });
        self.fit_camera(map, route);
    }

    fn fit_camera(&self, map: &mut dyn MapSurface, route: &Route) {
        tracing::debug!(
            "Fitting camera to {} / {} (padding {}px)",
            route.bounds.southwest,
            route.bounds.northeast,
            self.style.camera_padding
        );
        map.animate_camera(CameraUpdate::FitBounds {
            bounds: route.bounds,
            padding: self.style.camera_padding,
        });
    }
}
