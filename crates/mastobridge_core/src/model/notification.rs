//! Native notification projection.

use crate::crosswalk::NativeNotificationType;
use crate::model::note::NativeNote;
use crate::model::user::NativeUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeNotification {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: NativeNotificationType,
    /// Actor that caused the notification. Absent for system notifications.
    pub user: Option<NativeUser>,
    pub note: Option<NativeNote>,
    /// Reaction key for `reaction` notifications.
    pub reaction: Option<String>,
    pub is_read: bool,
}
