use crate::domain::model::{DeepLinkEvent, NavigationRequest};
use crate::utils::error::{Result, RouteError};
use url::Url;

pub const ORIGIN_PARAM: &str = "origin";
pub const DESTINATION_PARAM: &str = "dest";
pub const DESTINATION_ALIAS: &str = "destination";

/// 解析 deep link，取出起點與終點名稱
///
/// Only view actions carry a navigation request. Any other action, a missing
/// URI or a missing/blank parameter is returned as an error for the caller to
/// log; nothing here panics on absent data.
pub fn parse_deep_link(event: &DeepLinkEvent) -> Result<NavigationRequest> {
    if !event.action.is_view() {
        return Err(RouteError::NotViewAction {
            action: event.action.to_string(),
        });
    }

    let raw = event.data.as_deref().ok_or(RouteError::MissingUri)?;
    tracing::debug!("Deep link data => {}", raw);

    let uri = Url::parse(raw).map_err(|e| {
        tracing::debug!("URI parse error: {}", e);
        RouteError::InvalidUri {
            uri: raw.to_string(),
        }
    })?;

    let origin_name = query_value(&uri, &[ORIGIN_PARAM]).ok_or_else(|| {
        RouteError::MissingParameter {
            name: ORIGIN_PARAM.to_string(),
        }
    })?;
    let destination_name = query_value(&uri, &[DESTINATION_PARAM, DESTINATION_ALIAS])
        .ok_or_else(|| RouteError::MissingParameter {
            name: DESTINATION_PARAM.to_string(),
        })?;

    tracing::info!("origin location => {}", origin_name);
    tracing::info!("destination location => {}", destination_name);

    Ok(NavigationRequest {
        origin_name,
        destination_name,
    })
}

fn query_value(uri: &Url, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        uri.query_pairs()
            .find(|(key, _)| key == *name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
