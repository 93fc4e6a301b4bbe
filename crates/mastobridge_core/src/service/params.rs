use crate::config::BridgeConfig;
use crate::crosswalk::{expand_external_types, ExternalNotificationType, NativeNotificationType};
use crate::error::BridgeResult;
use crate::id::to_native_id_padded;
use log::debug;
use serde::Deserialize;

const TIMELINE_DEFAULT_LIMIT: u32 = 20;
const TIMELINE_MAX_LIMIT: u32 = 40;
const NOTIFICATION_DEFAULT_LIMIT: u32 = 20;
const NOTIFICATION_MAX_LIMIT: u32 = 100;

/// Decodes an id path parameter to a native id of the configured width.
pub fn resolve_wire_id(param: &str, config: &BridgeConfig) -> BridgeResult<String> {
    to_native_id_padded(param.trim(), config.native_id_width)
}

fn resolve_optional(param: Option<&str>, config: &BridgeConfig) -> BridgeResult<Option<String>> {
    param.map(|value| resolve_wire_id(value, config)).transpose()
}

fn clamp_limit(limit: Option<u32>, default: u32, max: u32) -> u32 {
    match limit {
        None | Some(0) => default,
        Some(value) => value.min(max),
    }
}

/// Native pagination window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativePage {
    pub until_id: Option<String>,
    pub since_id: Option<String>,
    /// Set when the client asked for the page right after `min_id`.
    pub min_id: Option<String>,
    pub limit: u32,
}

/// Pagination query of timeline-style endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TimelineParams {
    pub max_id: Option<String>,
    pub since_id: Option<String>,
    pub min_id: Option<String>,
    pub limit: Option<u32>,
}

impl TimelineParams {
    pub fn to_native(&self, config: &BridgeConfig) -> BridgeResult<NativePage> {
        self.to_native_with(config, TIMELINE_DEFAULT_LIMIT, TIMELINE_MAX_LIMIT)
    }

    fn to_native_with(
        &self,
        config: &BridgeConfig,
        default: u32,
        max: u32,
    ) -> BridgeResult<NativePage> {
        Ok(NativePage {
            until_id: resolve_optional(self.max_id.as_deref(), config)?,
            since_id: resolve_optional(self.since_id.as_deref(), config)?,
            min_id: resolve_optional(self.min_id.as_deref(), config)?,
            limit: clamp_limit(self.limit, default, max),
        })
    }
}

/// Query of `GET /api/v1/notifications`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotificationParams {
    #[serde(flatten)]
    pub page: TimelineParams,
    #[serde(default)]
    pub exclude_types: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Native notification query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeNotificationQuery {
    pub page: NativePage,
    pub exclude_types: Vec<NativeNotificationType>,
    /// Empty means every type.
    pub include_types: Vec<NativeNotificationType>,
}

impl NotificationParams {
    pub fn to_native(&self, config: &BridgeConfig) -> BridgeResult<NativeNotificationQuery> {
        let page =
            self.page
                .to_native_with(config, NOTIFICATION_DEFAULT_LIMIT, NOTIFICATION_MAX_LIMIT)?;
        Ok(NativeNotificationQuery {
            page,
            exclude_types: expand_named_types(&self.exclude_types),
            include_types: expand_named_types(&self.types),
        })
    }
}

fn expand_named_types(names: &[String]) -> Vec<NativeNotificationType> {
    let known = names
        .iter()
        .filter_map(|name| {
            let parsed = ExternalNotificationType::parse(name.trim());
            if parsed.is_none() {
                debug!(
                    "event=notification_params module=service status=ok reason=unknown_type_ignored"
                );
            }
            parsed
        })
        .collect::<Vec<_>>();
    expand_external_types(&known)
}
