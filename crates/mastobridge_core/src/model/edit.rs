//! Recorded prior states of edited notes.

use crate::model::note::NativeFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry per edit of a note.
///
/// `old_text` is the text the note had before this edit; `files` is the
/// attachment set recorded at this edit point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSnapshot {
    pub id: String,
    pub note_id: String,
    pub old_text: Option<String>,
    pub new_text: Option<String>,
    pub cw: Option<String>,
    pub files: Vec<NativeFile>,
    pub updated_at: DateTime<Utc>,
}
