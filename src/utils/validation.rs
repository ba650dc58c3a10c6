use crate::utils::error::{Result, RouteError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(RouteError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| RouteError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("directions.endpoint", "https://example.com").is_ok());
        assert!(validate_url("directions.endpoint", "http://127.0.0.1:8080/json").is_ok());
        assert!(validate_url("directions.endpoint", "").is_err());
        assert!(validate_url("directions.endpoint", "invalid-url").is_err());
        assert!(validate_url("directions.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("geocoding.max_results", 5, 1).is_ok());
        assert!(validate_positive_number("geocoding.max_results", 0, 1).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let key: Option<String> = None;
        let err = validate_required_field("directions.api_key", &key).unwrap_err();
        assert!(matches!(err, RouteError::MissingConfigError { .. }));

        let key = Some("abc".to_string());
        assert_eq!(validate_required_field("directions.api_key", &key).unwrap(), "abc");
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("render.stroke_width", 4.0, 0.1, 100.0).is_ok());
        assert!(validate_range("render.stroke_width", 0.0, 0.1, 100.0).is_err());
    }
}
