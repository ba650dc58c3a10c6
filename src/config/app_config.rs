use crate::adapters::google_directions::DEFAULT_DIRECTIONS_ENDPOINT;
use crate::adapters::google_geocoder::DEFAULT_GEOCODING_ENDPOINT;
use crate::core::controller::{ControllerSettings, OverlapPolicy};
use crate::core::geocoding::DEFAULT_MAX_RESULTS;
use crate::core::renderer::{RenderStyle, DEFAULT_CAMERA_PADDING, DEFAULT_STROKE_WIDTH};
use crate::domain::model::{AvoidType, Color};
use crate::utils::error::{Result, RouteError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub directions: DirectionsConfig,
    pub geocoding: GeocodingConfig,
    pub render: RenderConfig,
    pub controller: ControllerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionsConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub avoid: Vec<AvoidType>,
    pub timeout_seconds: Option<u64>,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_DIRECTIONS_ENDPOINT.to_string(),
            api_key: None,
            avoid: AvoidType::default_set(),
            timeout_seconds: Some(30),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_results: usize,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEOCODING_ENDPOINT.to_string(),
            api_key: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub stroke_width: f32,
    pub color: Color,
    pub camera_padding: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            color: Color::RED,
            camera_padding: DEFAULT_CAMERA_PADDING,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub buffer_until_map_ready: bool,
    pub overlap_policy: OverlapPolicy,
    pub max_queued_requests: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        let settings = ControllerSettings::default();
        Self {
            buffer_until_map_ready: settings.buffer_until_map_ready,
            overlap_policy: settings.overlap_policy,
            max_queued_requests: settings.max_queued_requests,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RouteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RouteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOOGLE_MAPS_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RouteError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn directions_api_key(&self) -> Result<&str> {
        validation::validate_required_field("directions.api_key", &self.directions.api_key)
            .map(String::as_str)
    }

    /// Falls back to the directions key when no separate geocoding key is set.
    pub fn geocoding_api_key(&self) -> Result<&str> {
        match &self.geocoding.api_key {
            Some(key) => Ok(key.as_str()),
            None => self.directions_api_key(),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.directions.timeout_seconds.map(Duration::from_secs)
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            max_results: self.geocoding.max_results,
            avoid: self.directions.avoid.clone(),
            style: RenderStyle {
                stroke_width: self.render.stroke_width,
                color: self.render.color,
                camera_padding: self.render.camera_padding,
            },
            buffer_until_map_ready: self.controller.buffer_until_map_ready,
            overlap_policy: self.controller.overlap_policy,
            max_queued_requests: self.controller.max_queued_requests,
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("directions.endpoint", &self.directions.endpoint)?;
        validation::validate_url("geocoding.endpoint", &self.geocoding.endpoint)?;

        validate_api_key("directions.api_key", self.directions_api_key()?)?;
        if let Some(key) = &self.geocoding.api_key {
            validate_api_key("geocoding.api_key", key)?;
        }

        validation::validate_positive_number("geocoding.max_results", self.geocoding.max_results, 1)?;
        validation::validate_range("render.stroke_width", self.render.stroke_width, 0.1, 100.0)?;
        validation::validate_positive_number(
            "controller.max_queued_requests",
            self.controller.max_queued_requests,
            1,
        )?;

        if let Some(timeout) = self.directions.timeout_seconds {
            validation::validate_positive_number("directions.timeout_seconds", timeout as usize, 1)?;
        }

        Ok(())
    }
}

/// 金鑰不可為空，也不可留有未替換的 ${VAR}
fn validate_api_key(field_name: &str, key: &str) -> Result<()> {
    validation::validate_non_empty_string(field_name, key)?;
    if key.contains("${") {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: key.to_string(),
            reason: "environment variable is not set".to_string(),
        });
    }
    Ok(())
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_demo_constants() {
        let config = AppConfig::default();
        let settings = config.controller_settings();

        assert_eq!(settings.max_results, 5);
        assert_eq!(settings.avoid, AvoidType::default_set());
        assert_eq!(settings.style.stroke_width, 4.0);
        assert_eq!(settings.style.color, Color::RED);
        assert_eq!(settings.style.camera_padding, 100);
        assert_eq!(settings.overlap_policy, OverlapPolicy::Queue);
        assert!(settings.buffer_until_map_ready);
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r##"
[directions]
endpoint = "https://directions.example.com/json"
api_key = "abc123"
avoid = ["tolls", "indoor"]
timeout_seconds = 10

[geocoding]
max_results = 3

[render]
stroke_width = 6.5
color = "#3366FF"
camera_padding = 48

[controller]
buffer_until_map_ready = false
overlap_policy = "replace"
max_queued_requests = 2
"##;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.directions.avoid, vec![AvoidType::Tolls, AvoidType::Indoor]);
        assert_eq!(config.geocoding_api_key().unwrap(), "abc123");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));

        let settings = config.controller_settings();
        assert_eq!(settings.max_results, 3);
        assert_eq!(settings.style.color, Color(0xFF33_66FF));
        assert_eq!(settings.style.camera_padding, 48);
        assert_eq!(settings.overlap_policy, OverlapPolicy::Replace);
        assert!(!settings.buffer_until_map_ready);
        assert_eq!(settings.max_queued_requests, 2);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DEEPLINK_ROUTE_TEST_KEY", "from-env");

        let config = AppConfig::from_toml_str(
            r#"
[directions]
api_key = "${DEEPLINK_ROUTE_TEST_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.directions_api_key().unwrap(), "from-env");

        std::env::remove_var("DEEPLINK_ROUTE_TEST_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let config = AppConfig::from_toml_str(
            r#"
[directions]
api_key = "${DEEPLINK_ROUTE_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unset_env_var_in_geocoding_key_fails_validation() {
        let config = AppConfig::from_toml_str(
            r#"
[directions]
api_key = "directions-key"

[geocoding]
api_key = "${DEEPLINK_ROUTE_SURELY_UNSET_GEOCODING_VAR}"
"#,
        )
        .unwrap();
        match config.validate().unwrap_err() {
            RouteError::InvalidConfigValueError { field, .. } => {
                assert_eq!(field, "geocoding.api_key")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_config_validation() {
        let missing_key = AppConfig::default();
        assert!(matches!(
            missing_key.validate().unwrap_err(),
            RouteError::MissingConfigError { .. }
        ));

        let mut config = AppConfig::default();
        config.directions.api_key = Some("k".to_string());
        assert!(config.validate().is_ok());

        config.geocoding.max_results = 0;
        assert!(config.validate().is_err());

        config.geocoding.max_results = 1;
        config.directions.endpoint = "invalid-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
[render]
color = "chartreuse-ish"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[directions]\napi_key = \"file-key\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.directions_api_key().unwrap(), "file-key");
        assert_eq!(config.directions.endpoint, DEFAULT_DIRECTIONS_ENDPOINT);
    }
}
