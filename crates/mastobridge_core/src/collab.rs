//! Collaborator contracts consumed by the converter and history translator.
//!
//! # Responsibility
//! - Describe the native-side lookups this layer depends on.
//! - Bundle them into one cheaply clonable handle.
//!
//! # Invariants
//! - Lookups return `Ok(None)` for missing entities; `Err` is reserved for
//!   infrastructure failures (`UpstreamUnavailable`).
//! - Every call suspends the caller; implementations must not block the
//!   executor thread for long.

use crate::error::BridgeResult;
use crate::markup::{MarkupParser, MarkupRenderer};
use crate::model::edit::EditSnapshot;
use crate::model::note::NativeNote;
use crate::model::user::NativeUser;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn get_user(&self, id: &str) -> BridgeResult<Option<NativeUser>>;
}

#[async_trait]
pub trait NoteLookup: Send + Sync {
    async fn get_note(&self, id: &str) -> BridgeResult<Option<NativeNote>>;
}

/// Resolved custom emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEmoji {
    pub url: String,
    pub category: Option<String>,
}

#[async_trait]
pub trait EmojiResolver: Send + Sync {
    /// Looks up `shortcode` among the custom emoji of `host`.
    async fn resolve_emoji(&self, shortcode: &str, host: &str)
        -> BridgeResult<Option<ResolvedEmoji>>;
}

#[async_trait]
pub trait EditSnapshotStore: Send + Sync {
    /// Snapshots recorded for `note_id`, oldest first.
    async fn get_edit_snapshots(&self, note_id: &str) -> BridgeResult<Vec<EditSnapshot>>;
}

/// Every collaborator the compatibility layer needs.
#[derive(Clone)]
pub struct Collaborators {
    pub users: Arc<dyn UserLookup>,
    pub notes: Arc<dyn NoteLookup>,
    pub emojis: Arc<dyn EmojiResolver>,
    pub snapshots: Arc<dyn EditSnapshotStore>,
    pub parser: Arc<dyn MarkupParser>,
    pub renderer: Arc<dyn MarkupRenderer>,
}
