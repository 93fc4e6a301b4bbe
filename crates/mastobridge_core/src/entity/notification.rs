use crate::crosswalk::ExternalNotificationType;
use crate::entity::account::Account;
use crate::entity::status::{Reaction, Status};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ExternalNotificationType,
    pub created_at: String,
    pub account: Account,
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction: Option<Reaction>,
}
