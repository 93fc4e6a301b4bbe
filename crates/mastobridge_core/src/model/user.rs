//! Native user projection.

use crate::crosswalk::NativeVisibility;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One key/value profile field as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileField {
    pub name: String,
    pub value: String,
}

/// Native user as returned by the user lookup collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeUser {
    pub id: String,
    pub username: String,
    /// `None` for local users.
    pub host: Option<String>,
    pub name: Option<String>,
    /// Profile text in native markup.
    pub description: Option<String>,
    pub uri: Option<String>,
    pub url: Option<String>,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub followers_count: u64,
    pub following_count: u64,
    pub notes_count: u64,
    pub last_note_at: Option<DateTime<Utc>>,
    pub is_locked: bool,
    pub is_bot: bool,
    pub is_explorable: bool,
    pub fields: Vec<ProfileField>,
    /// Custom emoji shortcodes used in name/description, scoped to `host`.
    pub emojis: Vec<String>,
    pub lang: Option<String>,
    pub always_mark_nsfw: bool,
    pub default_visibility: NativeVisibility,
}

impl NativeUser {
    /// Creates a minimal local user; remaining fields take neutral defaults.
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            host: None,
            name: None,
            description: None,
            uri: None,
            url: None,
            avatar_url: None,
            banner_url: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            followers_count: 0,
            following_count: 0,
            notes_count: 0,
            last_note_at: None,
            is_locked: false,
            is_bot: false,
            is_explorable: true,
            fields: Vec::new(),
            emojis: Vec::new(),
            lang: None,
            always_mark_nsfw: false,
            default_visibility: NativeVisibility::Public,
        }
    }

    /// Same as `new`, but for an account living on `host`.
    pub fn remote(
        id: impl Into<String>,
        username: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        let mut user = Self::new(id, username);
        user.host = Some(host.into());
        user
    }

    pub fn is_local(&self) -> bool {
        self.host.is_none()
    }

    /// `username` for local users, `username@host` for remote ones.
    pub fn acct(&self) -> String {
        match &self.host {
            Some(host) => format!("{}@{}", self.username, host),
            None => self.username.clone(),
        }
    }

    /// Host the account lives on, with `local_host` standing in for locals.
    pub fn effective_host<'a>(&'a self, local_host: &'a str) -> &'a str {
        self.host.as_deref().unwrap_or(local_host)
    }
}
