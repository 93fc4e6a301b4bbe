//! Entity converter: native aggregates to wire entities.
//!
//! # Responsibility
//! - Project accounts, notes, notifications and the shallow aggregates into
//!   wire entities, applying the id codec to every id field.
//! - Translate credential updates from wire input into native commands.
//!
//! # Invariants
//! - A converted status never has both `reblog` and `quote` populated.
//! - Missing referenced notes/users fail with `NotFound`; a failed mention,
//!   emoji or profile field only degrades the result.
//! - Memoized lookups live in a `ConversionScope` owned by one top-level
//!   call and are dropped with it.

mod account;
mod notification;
mod simple;
mod status;

pub use account::{placeholder_account, to_native_profile_update};
pub use simple::{
    convert_announcement, convert_attachment, convert_featured_tag, convert_filter, convert_list,
    convert_poll, convert_relationship,
};

use crate::collab::{Collaborators, ResolvedEmoji};
use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult, EntityKind};
use crate::model::note::{MentionedRemoteUser, NativeNote};
use crate::model::user::NativeUser;
use chrono::{DateTime, SecondsFormat, Utc};
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

/// Embedded reblog/quote levels followed before the chain is cut.
const MAX_EMBED_DEPTH: usize = 4;

/// Per-call memo of collaborator lookups.
///
/// Created by each public conversion entry point and never shared across
/// calls, requests or tenants.
#[derive(Debug, Default)]
pub struct ConversionScope {
    users: HashMap<String, Option<NativeUser>>,
    emojis: HashMap<(String, String), Option<ResolvedEmoji>>,
}

impl ConversionScope {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Converter over injected collaborators.
#[derive(Clone)]
pub struct MastoConverter {
    config: Arc<BridgeConfig>,
    collab: Collaborators,
}

impl MastoConverter {
    pub fn new(config: Arc<BridgeConfig>, collab: Collaborators) -> Self {
        Self { config, collab }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub(crate) fn collaborators(&self) -> &Collaborators {
        &self.collab
    }

    /// Loads a note or fails with `NotFound`.
    pub async fn fetch_note(&self, id: &str) -> BridgeResult<NativeNote> {
        self.collab
            .notes
            .get_note(id)
            .await?
            .ok_or_else(|| BridgeError::not_found(EntityKind::Note, id))
    }

    /// Loads a user or fails with `NotFound`.
    pub async fn fetch_user(&self, id: &str) -> BridgeResult<NativeUser> {
        self.collab
            .users
            .get_user(id)
            .await?
            .ok_or_else(|| BridgeError::not_found(EntityKind::User, id))
    }

    /// Memoized user lookup; `Ok(None)` when the user does not exist.
    pub(crate) async fn lookup_user(
        &self,
        id: &str,
        scope: &mut ConversionScope,
    ) -> BridgeResult<Option<NativeUser>> {
        if let Some(cached) = scope.users.get(id) {
            return Ok(cached.clone());
        }
        let user = self.collab.users.get_user(id).await?;
        scope.users.insert(id.to_string(), user.clone());
        Ok(user)
    }

    /// Memoized emoji lookup; failures degrade to `None`.
    pub(crate) async fn lookup_emoji(
        &self,
        shortcode: &str,
        host: &str,
        scope: &mut ConversionScope,
    ) -> Option<ResolvedEmoji> {
        let key = (shortcode.to_string(), host.to_string());
        if let Some(cached) = scope.emojis.get(&key) {
            return cached.clone();
        }
        let resolved = match self.collab.emojis.resolve_emoji(shortcode, host).await {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!(
                    "event=emoji_resolve module=convert status=degraded error_code={} host={}",
                    err.code(),
                    host
                );
                None
            }
        };
        scope.emojis.insert(key, resolved.clone());
        resolved
    }

    /// Parses and renders native markup text.
    pub(crate) async fn render_text(
        &self,
        text: &str,
        mentioned_remote_users: &[MentionedRemoteUser],
        inline: bool,
        quote_uri: Option<&str>,
    ) -> BridgeResult<String> {
        let nodes = self.collab.parser.parse(text);
        self.collab
            .renderer
            .render(&nodes, mentioned_remote_users, inline, quote_uri)
            .await
    }

    /// Canonical URL of a note: stored url, then uri, then a local URL.
    pub(crate) fn note_canonical_url(&self, note: &NativeNote) -> String {
        note.url
            .clone()
            .or_else(|| note.uri.clone())
            .unwrap_or_else(|| self.config.note_url(&note.id))
    }
}

/// ISO-8601 UTC timestamp with millisecond precision.
pub(crate) fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Codec for optional native ids.
pub(crate) fn optional_wire_id(value: Option<&str>) -> BridgeResult<Option<String>> {
    value.map(crate::id::to_wire_id).transpose()
}
