//! Mastodon-compatible API layer over a native federated note server.
//! Converts native ids, entities, notification types and edit history into
//! the external dialect, and translates client requests back.

pub mod collab;
pub mod config;
pub mod convert;
pub mod crosswalk;
pub mod db;
pub mod entity;
pub mod error;
pub mod history;
pub mod id;
pub mod logging;
pub mod markup;
pub mod model;
pub mod repo;
pub mod service;

pub use collab::{
    Collaborators, EditSnapshotStore, EmojiResolver, NoteLookup, ResolvedEmoji, UserLookup,
};
pub use config::{BridgeConfig, ConfigError};
pub use convert::{to_native_profile_update, ConversionScope, MastoConverter};
pub use crosswalk::{
    to_external_notification_type, to_native_notification_types, ExternalNotificationType,
    NativeNotificationType,
};
pub use error::{BridgeError, BridgeResult, EntityKind, ErrorKind};
pub use history::EditHistoryTranslator;
pub use id::{to_native_id, to_native_id_padded, to_wire_id, DEFAULT_NATIVE_ID_WIDTH};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status};
pub use repo::edit_repo::{RepoError, RepoResult, SqliteEditSnapshotStore};
pub use service::resolve_wire_id;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
