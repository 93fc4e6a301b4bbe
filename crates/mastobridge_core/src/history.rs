//! Edit history translation.
//!
//! # Responsibility
//! - Present the recorded prior states of a note as wire `StatusEdit`s.
//!
//! # Invariants
//! - Output is ordered by snapshot timestamp, oldest first; equal
//!   timestamps keep the store's order.
//! - A note that was never edited yields an empty list, not an error.
//! - Every entry carries the note author's current account projection.
//!
//! # See also
//! - `repo::edit_repo` for the SQLite snapshot store.

use crate::convert::{convert_attachment, ConversionScope, MastoConverter};
use crate::entity::{Attachment, StatusEdit};
use crate::error::{BridgeError, BridgeResult};
use crate::model::note::NativeNote;
use log::{debug, warn};

/// Translates edit snapshots of one note at a time.
#[derive(Clone)]
pub struct EditHistoryTranslator {
    converter: MastoConverter,
}

impl EditHistoryTranslator {
    pub fn new(converter: MastoConverter) -> Self {
        Self { converter }
    }

    /// Edit history of the note with native id `note_id`.
    ///
    /// # Errors
    /// - `NotFound` when the note does not exist.
    /// - `UpstreamUnavailable` when the snapshot store fails or returns a
    ///   snapshot belonging to another note.
    pub async fn status_history(&self, note_id: &str) -> BridgeResult<Vec<StatusEdit>> {
        let note = self.converter.fetch_note(note_id).await?;
        self.history_of(&note).await
    }

    /// Same as `status_history` for an already loaded note.
    pub async fn history_of(&self, note: &NativeNote) -> BridgeResult<Vec<StatusEdit>> {
        let mut snapshots = self
            .converter
            .collaborators()
            .snapshots
            .get_edit_snapshots(&note.id)
            .await?;

        if snapshots.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(foreign) = snapshots.iter().find(|snapshot| snapshot.note_id != note.id) {
            warn!(
                "event=status_history module=history status=error reason=foreign_snapshot note_id={} snapshot_id={}",
                note.id, foreign.id
            );
            return Err(BridgeError::upstream(format!(
                "snapshot {} does not belong to note {}",
                foreign.id, note.id
            )));
        }
        // Stable: equal timestamps keep store order.
        snapshots.sort_by_key(|snapshot| snapshot.updated_at);

        let mut scope = ConversionScope::new();
        let account = self
            .converter
            .convert_account_in(&note.user, &mut scope)
            .await?;
        let host = note
            .user
            .effective_host(&self.converter.config().host)
            .to_string();
        let emojis = self
            .converter
            .convert_emojis(&note.emojis, &host, &mut scope)
            .await;

        let mut history = Vec::with_capacity(snapshots.len());
        for snapshot in &snapshots {
            let content = match snapshot.old_text.as_deref() {
                Some(text) if !text.is_empty() => {
                    self.converter
                        .render_text(text, &note.mentioned_remote_users, false, None)
                        .await?
                }
                _ => String::new(),
            };
            let media_attachments = snapshot
                .files
                .iter()
                .map(convert_attachment)
                .collect::<BridgeResult<Vec<Attachment>>>()?;

            history.push(StatusEdit {
                account: account.clone(),
                content,
                plain_content: snapshot.old_text.clone(),
                created_at: crate::convert::format_timestamp(&snapshot.updated_at),
                emojis: emojis.clone(),
                sensitive: snapshot.files.iter().any(|file| file.is_sensitive),
                spoiler_text: snapshot.cw.clone().unwrap_or_default(),
                media_attachments,
                poll: None,
            });
        }

        debug!(
            "event=status_history module=history status=ok note_id={} entries={}",
            note.id,
            history.len()
        );
        Ok(history)
    }
}
