//! Native note projection and its embedded aggregates.
//!
//! # Invariants
//! - A note with `renote_id` is a boost: a pure reblog when it carries no
//!   content of its own, a quote otherwise. Never both.

use crate::crosswalk::NativeVisibility;
use crate::model::user::NativeUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Remote user mentioned by a note, as recorded at note creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionedRemoteUser {
    pub uri: String,
    pub url: Option<String>,
    pub username: String,
    pub host: String,
}

/// Drive file attached to a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeFile {
    pub id: String,
    pub name: String,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub blurhash: Option<String>,
    pub comment: Option<String>,
    pub is_sensitive: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollChoice {
    pub text: String,
    pub votes: u64,
    /// Whether the requesting actor voted for this choice.
    pub is_voted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativePoll {
    pub choices: Vec<PollChoice>,
    pub multiple: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Kind of boost a note represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoostKind<'a> {
    None,
    /// Content-free boost of the note with this id.
    Reblog(&'a str),
    /// Boost carrying its own text/media, of the note with this id.
    Quote(&'a str),
}

/// Native note as returned by the note lookup collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeNote {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Author, embedded by the native store.
    pub user: NativeUser,
    pub text: Option<String>,
    pub cw: Option<String>,
    pub visibility: NativeVisibility,
    pub reply_id: Option<String>,
    pub reply_user_id: Option<String>,
    pub renote_id: Option<String>,
    pub uri: Option<String>,
    pub url: Option<String>,
    pub files: Vec<NativeFile>,
    pub poll: Option<NativePoll>,
    /// Native ids of mentioned users.
    pub mentions: Vec<String>,
    pub mentioned_remote_users: Vec<MentionedRemoteUser>,
    /// Reaction key (`:shortcode@host:` or a unicode emoji) to count.
    pub reactions: BTreeMap<String, u64>,
    /// Reaction key chosen by the requesting actor, if any.
    pub my_reaction: Option<String>,
    /// Custom emoji shortcodes used in text/cw, scoped to the author's host.
    pub emojis: Vec<String>,
    pub tags: Vec<String>,
    pub replies_count: u64,
    pub renote_count: u64,
    pub lang: Option<String>,
}

impl NativeNote {
    /// Creates a public note by `user`; remaining fields take neutral defaults.
    pub fn new(id: impl Into<String>, user: NativeUser, text: Option<String>) -> Self {
        Self {
            id: id.into(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            user,
            text,
            cw: None,
            visibility: NativeVisibility::Public,
            reply_id: None,
            reply_user_id: None,
            renote_id: None,
            uri: None,
            url: None,
            files: Vec::new(),
            poll: None,
            mentions: Vec::new(),
            mentioned_remote_users: Vec::new(),
            reactions: BTreeMap::new(),
            my_reaction: None,
            emojis: Vec::new(),
            tags: Vec::new(),
            replies_count: 0,
            renote_count: 0,
            lang: None,
        }
    }

    /// Whether the note carries any content of its own.
    pub fn has_own_content(&self) -> bool {
        self.text.as_deref().is_some_and(|text| !text.is_empty())
            || self.cw.as_deref().is_some_and(|cw| !cw.is_empty())
            || !self.files.is_empty()
            || self.poll.is_some()
    }

    pub fn boost_kind(&self) -> BoostKind<'_> {
        match self.renote_id.as_deref() {
            None => BoostKind::None,
            Some(target) if self.has_own_content() => BoostKind::Quote(target),
            Some(target) => BoostKind::Reblog(target),
        }
    }

    pub fn total_reactions(&self) -> u64 {
        self.reactions.values().sum()
    }
}
