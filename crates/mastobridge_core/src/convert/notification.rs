//! Notification projection through the taxonomy crosswalk.

use super::account::placeholder_account;
use super::{format_timestamp, ConversionScope, MastoConverter};
use crate::crosswalk::{external_notification_entry, ExternalNotificationType, Fidelity};
use crate::entity::Notification;
use crate::error::BridgeResult;
use crate::id::to_wire_id;
use crate::model::notification::NativeNotification;
use log::{debug, warn};

impl MastoConverter {
    /// Projects a native notification into the external vocabulary.
    ///
    /// Native-only types fall back to `status`; the actor falls back to a
    /// placeholder account for system notifications.
    pub async fn convert_notification(
        &self,
        notification: &NativeNotification,
    ) -> BridgeResult<Notification> {
        let mut scope = ConversionScope::new();
        let (kind, fidelity) = external_notification_entry(notification.kind);
        if fidelity != Fidelity::Exact {
            debug!(
                "event=notification_convert module=convert status=ok native_type={} external_type={} fidelity={:?}",
                notification.kind.as_str(),
                kind.as_str(),
                fidelity
            );
        }

        let status = match notification.note.as_ref() {
            Some(note) => Some(self.convert_status_in(note, &mut scope, 0).await?),
            None => None,
        };

        let account = match (kind, status.as_ref(), notification.user.as_ref()) {
            (ExternalNotificationType::Poll, Some(status), _) => status.account.clone(),
            (_, _, Some(user)) => self.convert_account_in(user, &mut scope).await?,
            (_, _, None) => placeholder_account(self.config()),
        };

        let reaction = match (notification.reaction.as_deref(), notification.note.as_ref()) {
            (Some(key), Some(_)) => {
                let converted = self.convert_reaction(key, 1, false, &mut scope).await;
                if converted.is_none() {
                    warn!(
                        "event=notification_convert module=convert status=degraded reason=reaction_unresolved notification_id={}",
                        notification.id
                    );
                }
                converted
            }
            _ => None,
        };

        Ok(Notification {
            id: to_wire_id(&notification.id)?,
            kind,
            created_at: format_timestamp(&notification.created_at),
            account,
            status,
            reaction,
        })
    }
}
