//! Native list/filter/relationship/announcement projections and the profile
//! update command.

use crate::crosswalk::NativeVisibility;
use crate::model::user::ProfileField;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Relationship of the requesting actor towards user `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeRelation {
    pub id: String,
    pub is_following: bool,
    pub is_followed: bool,
    pub is_blocking: bool,
    pub is_blocked: bool,
    pub is_muted: bool,
    pub is_renote_muted: bool,
    pub has_pending_follow_request_from_you: bool,
    pub has_pending_follow_request_to_you: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeList {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeFilter {
    pub id: String,
    pub phrase: String,
    pub context: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub irreversible: bool,
    pub whole_word: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeAnnouncement {
    pub id: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeFeaturedTag {
    pub id: String,
    pub name: String,
    pub notes_count: u64,
    pub last_note_at: Option<DateTime<Utc>>,
}

/// Native profile update command translated from a credential update.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeProfileUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_bot: Option<bool>,
    pub is_locked: Option<bool>,
    pub is_explorable: Option<bool>,
    pub lang: Option<String>,
    pub always_mark_nsfw: Option<bool>,
    pub default_visibility: Option<NativeVisibility>,
    pub fields: Option<Vec<ProfileField>>,
}

impl NativeProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
