use crate::utils::error::{Result, RouteError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `lat,lng` 格式，供 directions API 查詢參數使用
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub southwest: Coordinate,
    pub northeast: Coordinate,
}

impl Bounds {
    /// Longitude is not checked: a box may cross the antimeridian.
    pub fn new(southwest: Coordinate, northeast: Coordinate) -> Result<Self> {
        if southwest.latitude > northeast.latitude {
            return Err(RouteError::InvalidBounds {
                south: southwest.latitude,
                north: northeast.latitude,
            });
        }
        Ok(Self {
            southwest,
            northeast,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub origin_name: String,
    pub destination_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub points: Vec<Coordinate>,
    pub bounds: Bounds,
}

/// 起點與終點在地理編碼之後的座標
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEndpoints {
    pub source: Coordinate,
    pub destination: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentAction {
    View,
    Main,
    Other(String),
}

impl IntentAction {
    pub fn is_view(&self) -> bool {
        matches!(self, IntentAction::View)
    }
}

impl FromStr for IntentAction {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let action = s.trim();
        Ok(match action {
            "android.intent.action.VIEW" => IntentAction::View,
            "android.intent.action.MAIN" => IntentAction::Main,
            _ if action.eq_ignore_ascii_case("view") => IntentAction::View,
            _ if action.eq_ignore_ascii_case("main") => IntentAction::Main,
            _ => IntentAction::Other(s.to_string()),
        })
    }
}

impl fmt::Display for IntentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentAction::View => write!(f, "android.intent.action.VIEW"),
            IntentAction::Main => write!(f, "android.intent.action.MAIN"),
            IntentAction::Other(action) => write!(f, "{}", action),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkEvent {
    pub action: IntentAction,
    pub data: Option<String>,
}

impl DeepLinkEvent {
    pub fn new(action: IntentAction, data: Option<String>) -> Self {
        Self { action, data }
    }

    pub fn view(uri: impl Into<String>) -> Self {
        Self::new(IntentAction::View, Some(uri.into()))
    }
}

/// Geocoder record. Either coordinate may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub formatted_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Address {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvoidType {
    Tolls,
    Ferries,
    Highways,
    Indoor,
}

impl AvoidType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvoidType::Tolls => "tolls",
            AvoidType::Ferries => "ferries",
            AvoidType::Highways => "highways",
            AvoidType::Indoor => "indoor",
        }
    }

    pub fn default_set() -> Vec<AvoidType> {
        vec![AvoidType::Tolls, AvoidType::Ferries, AvoidType::Highways]
    }

    /// `tolls|ferries|highways`，重複項目只保留一次
    pub fn join(avoid: &[AvoidType]) -> String {
        let mut seen = Vec::with_capacity(avoid.len());
        for item in avoid {
            if !seen.contains(item) {
                seen.push(*item);
            }
        }
        seen.iter().map(|a| a.as_str()).collect::<Vec<_>>().join("|")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    pub source: Coordinate,
    pub destination: Coordinate,
    pub avoid: Vec<AvoidType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DirectionStatus {
    Ok,
    NotFound,
    ZeroResults,
    MaxWaypointsExceeded,
    MaxRouteLengthExceeded,
    InvalidRequest,
    OverDailyLimit,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    Other(String),
}

impl DirectionStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, DirectionStatus::Ok)
    }
}

impl From<String> for DirectionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OK" => DirectionStatus::Ok,
            "NOT_FOUND" => DirectionStatus::NotFound,
            "ZERO_RESULTS" => DirectionStatus::ZeroResults,
            "MAX_WAYPOINTS_EXCEEDED" => DirectionStatus::MaxWaypointsExceeded,
            "MAX_ROUTE_LENGTH_EXCEEDED" => DirectionStatus::MaxRouteLengthExceeded,
            "INVALID_REQUEST" => DirectionStatus::InvalidRequest,
            "OVER_DAILY_LIMIT" => DirectionStatus::OverDailyLimit,
            "OVER_QUERY_LIMIT" => DirectionStatus::OverQueryLimit,
            "REQUEST_DENIED" => DirectionStatus::RequestDenied,
            "UNKNOWN_ERROR" => DirectionStatus::UnknownError,
            _ => DirectionStatus::Other(value),
        }
    }
}

impl From<DirectionStatus> for String {
    fn from(value: DirectionStatus) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DirectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DirectionStatus::Ok => "OK",
            DirectionStatus::NotFound => "NOT_FOUND",
            DirectionStatus::ZeroResults => "ZERO_RESULTS",
            DirectionStatus::MaxWaypointsExceeded => "MAX_WAYPOINTS_EXCEEDED",
            DirectionStatus::MaxRouteLengthExceeded => "MAX_ROUTE_LENGTH_EXCEEDED",
            DirectionStatus::InvalidRequest => "INVALID_REQUEST",
            DirectionStatus::OverDailyLimit => "OVER_DAILY_LIMIT",
            DirectionStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            DirectionStatus::RequestDenied => "REQUEST_DENIED",
            DirectionStatus::UnknownError => "UNKNOWN_ERROR",
            DirectionStatus::Other(other) => other.as_str(),
        };
        write!(f, "{}", s)
    }
}

/// Google Directions 回應格式中的經緯度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngLiteral {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLngLiteral> for Coordinate {
    fn from(value: LatLngLiteral) -> Self {
        Coordinate::new(value.lat, value.lng)
    }
}

impl From<Coordinate> for LatLngLiteral {
    fn from(value: Coordinate) -> Self {
        LatLngLiteral {
            lat: value.latitude,
            lng: value.longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionBounds {
    pub northeast: LatLngLiteral,
    pub southwest: LatLngLiteral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedPolyline {
    pub points: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub start_location: LatLngLiteral,
    pub end_location: LatLngLiteral,
    pub polyline: EncodedPolyline,
    #[serde(default)]
    pub distance: Option<TextValue>,
    #[serde(default)]
    pub duration: Option<TextValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub start_location: LatLngLiteral,
    pub end_location: LatLngLiteral,
    #[serde(default)]
    pub start_address: Option<String>,
    #[serde(default)]
    pub end_address: Option<String>,
    #[serde(default)]
    pub distance: Option<TextValue>,
    #[serde(default)]
    pub duration: Option<TextValue>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Leg {
    /// 依序解碼每個 step 的 polyline 並串接
    pub fn direction_points(&self) -> Result<Vec<Coordinate>> {
        let mut points = Vec::new();
        for step in &self.steps {
            points.extend(crate::utils::polyline::decode(&step.polyline.points)?);
        }
        Ok(points)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionRoute {
    pub bounds: DirectionBounds,
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub overview_polyline: Option<EncodedPolyline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub status: DirectionStatus,
    #[serde(default)]
    pub routes: Vec<DirectionRoute>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl Direction {
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

/// ARGB color, as the map surface expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    pub const RED: Color = Color(0xFFFF_0000);
    pub const GREEN: Color = Color(0xFF00_FF00);
    pub const BLUE: Color = Color(0xFF00_00FF);
    pub const BLACK: Color = Color(0xFF00_0000);
}

impl FromStr for Color {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| RouteError::InvalidConfigValueError {
            field: "color".to_string(),
            value: s.to_string(),
            reason: reason.to_string(),
        };

        match s.trim().to_ascii_lowercase().as_str() {
            "red" => return Ok(Color::RED),
            "green" => return Ok(Color::GREEN),
            "blue" => return Ok(Color::BLUE),
            "black" => return Ok(Color::BLACK),
            _ => {}
        }

        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| invalid("expected #RRGGBB, #AARRGGBB or a color name"))?;
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| invalid("not a hexadecimal color"))?;
        match hex.len() {
            6 => Ok(Color(0xFF00_0000 | value)),
            8 => Ok(Color(value)),
            _ => Err(invalid("expected 6 or 8 hex digits")),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = RouteError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerOptions {
    pub position: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolylineOptions {
    pub points: Vec<Coordinate>,
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraUpdate {
    FitBounds { bounds: Bounds, padding: u32 },
}

/// A command issued to the map surface, recorded for inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MapCommand {
    ZoomControls { enabled: bool },
    Marker(MarkerOptions),
    Polyline(PolylineOptions),
    Camera(CameraUpdate),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_action_parsing() {
        assert_eq!(
            "android.intent.action.VIEW".parse::<IntentAction>().unwrap(),
            IntentAction::View
        );
        assert_eq!("view".parse::<IntentAction>().unwrap(), IntentAction::View);
        assert_eq!(
            "android.intent.action.MAIN".parse::<IntentAction>().unwrap(),
            IntentAction::Main
        );
        assert_eq!(
            "android.intent.action.SEND".parse::<IntentAction>().unwrap(),
            IntentAction::Other("android.intent.action.SEND".to_string())
        );
    }

    #[test]
    fn test_custom_actions_ending_in_view_are_not_view() {
        assert_eq!(
            "com.example.view".parse::<IntentAction>().unwrap(),
            IntentAction::Other("com.example.view".to_string())
        );
        assert_eq!(
            "android.intent.action.view".parse::<IntentAction>().unwrap(),
            IntentAction::Other("android.intent.action.view".to_string())
        );
        assert!(!"com.example.VIEW".parse::<IntentAction>().unwrap().is_view());
    }

    #[test]
    fn test_bounds_rejects_inverted_latitudes() {
        let sw = Coordinate::new(47.6, -122.3);
        let ne = Coordinate::new(45.5, -122.6);
        assert!(Bounds::new(sw, ne).is_err());
        assert!(Bounds::new(ne, sw).is_ok());
    }

    #[test]
    fn test_address_coordinate_requires_both_axes() {
        let partial = Address {
            latitude: Some(47.6),
            ..Default::default()
        };
        assert_eq!(partial.coordinate(), None);

        let full = Address {
            formatted_address: Some("Seattle, WA, USA".to_string()),
            latitude: Some(47.6),
            longitude: Some(-122.3),
        };
        assert_eq!(full.coordinate(), Some(Coordinate::new(47.6, -122.3)));
    }

    #[test]
    fn test_avoid_join() {
        assert_eq!(AvoidType::join(&AvoidType::default_set()), "tolls|ferries|highways");
        assert_eq!(
            AvoidType::join(&[AvoidType::Tolls, AvoidType::Tolls]),
            "tolls"
        );
    }

    #[test]
    fn test_direction_status_round_trip_strings() {
        let status: DirectionStatus = serde_json::from_str("\"ZERO_RESULTS\"").unwrap();
        assert_eq!(status, DirectionStatus::ZeroResults);
        let status: DirectionStatus = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(status, DirectionStatus::Other("SOMETHING_NEW".to_string()));
        assert!(!status.is_ok());
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!("#FF0000".parse::<Color>().unwrap(), Color::RED);
        assert_eq!("red".parse::<Color>().unwrap(), Color::RED);
        assert_eq!("#800000FF".parse::<Color>().unwrap(), Color(0x8000_00FF));
        assert!("FF0000".parse::<Color>().is_err());
        assert!("#FF00".parse::<Color>().is_err());
        assert_eq!(Color::RED.to_string(), "#FFFF0000");
    }
}
