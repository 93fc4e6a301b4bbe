//! Status projection, including embedded reblog/quote and reactions.

use super::{
    format_timestamp, optional_wire_id, simple::convert_attachment, simple::convert_poll,
    ConversionScope, MastoConverter, MAX_EMBED_DEPTH,
};
use crate::config::BridgeConfig;
use crate::crosswalk::to_external_visibility;
use crate::entity::{Attachment, Conversation, Mention, Reaction, Status, Tag};
use crate::error::BridgeResult;
use crate::id::to_wire_id;
use crate::model::note::{BoostKind, NativeNote};
use crate::model::user::NativeUser;
use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};
use log::{debug, warn};

impl MastoConverter {
    /// Projects a native note into a wire status.
    ///
    /// # Errors
    /// - `NotFound` when the boosted note no longer exists.
    /// - `InvalidId` when a stored id falls outside the native alphabet.
    /// - `UpstreamUnavailable` when the note store or renderer fails.
    pub async fn convert_status(&self, note: &NativeNote) -> BridgeResult<Status> {
        let mut scope = ConversionScope::new();
        self.convert_status_in(note, &mut scope, 0).await
    }

    /// Direct-message thread whose latest status is `note`.
    pub async fn convert_conversation(&self, note: &NativeNote) -> BridgeResult<Conversation> {
        let mut scope = ConversionScope::new();
        let mut accounts = vec![self.convert_account_in(&note.user, &mut scope).await?];

        if let Some(reply_user_id) = note.reply_user_id.as_deref() {
            if reply_user_id != note.user.id {
                match self.lookup_user(reply_user_id, &mut scope).await {
                    Ok(Some(user)) => accounts.push(self.convert_account_in(&user, &mut scope).await?),
                    Ok(None) => warn!(
                        "event=conversation_convert module=convert status=degraded reason=participant_missing note_id={}",
                        note.id
                    ),
                    Err(err) => warn!(
                        "event=conversation_convert module=convert status=degraded error_code={} note_id={}",
                        err.code(),
                        note.id
                    ),
                }
            }
        }

        let last_status = self.convert_status_in(note, &mut scope, 0).await?;
        Ok(Conversation {
            id: to_wire_id(&note.id)?,
            accounts,
            last_status: Some(last_status),
            unread: false,
        })
    }

    pub(crate) fn convert_status_in<'a>(
        &'a self,
        note: &'a NativeNote,
        scope: &'a mut ConversionScope,
        depth: usize,
    ) -> BoxFuture<'a, BridgeResult<Status>> {
        async move {
            let account = self.convert_account_in(&note.user, scope).await?;

            let (reblog, quote, quote_url) = match note.boost_kind() {
                BoostKind::None => (None, None, None),
                _ if depth >= MAX_EMBED_DEPTH => {
                    warn!(
                        "event=status_convert module=convert status=degraded reason=embed_depth note_id={}",
                        note.id
                    );
                    (None, None, None)
                }
                BoostKind::Reblog(target_id) => {
                    let target = self.fetch_note(target_id).await?;
                    let embedded = self.convert_status_in(&target, scope, depth + 1).await?;
                    (Some(Box::new(embedded)), None, None)
                }
                BoostKind::Quote(target_id) => {
                    let target = self.fetch_note(target_id).await?;
                    let embedded = self.convert_status_in(&target, scope, depth + 1).await?;
                    let url = self.note_canonical_url(&target);
                    (None, Some(Box::new(embedded)), Some(url))
                }
            };

            let text = note.text.as_deref().unwrap_or_default();
            let content = if text.is_empty() && quote_url.is_none() {
                String::new()
            } else {
                self.render_text(
                    text,
                    &note.mentioned_remote_users,
                    false,
                    quote_url.as_deref(),
                )
                .await?
            };

            let edited_at = self
                .collaborators()
                .snapshots
                .get_edit_snapshots(&note.id)
                .await?
                .iter()
                .map(|snapshot| snapshot.updated_at)
                .max()
                .map(|at| format_timestamp(&at));

            let host = note.user.effective_host(&self.config().host).to_string();
            let emojis = self.convert_emojis(&note.emojis, &host, scope).await;
            let mentions = self.convert_mentions(note, scope).await;
            let reactions = self.convert_reactions(note, scope).await;

            let media_attachments = note
                .files
                .iter()
                .map(convert_attachment)
                .collect::<BridgeResult<Vec<Attachment>>>()?;

            let poll = note
                .poll
                .as_ref()
                .map(|poll| convert_poll(poll, &note.id, Utc::now()))
                .transpose()?;

            let base_url = &self.config().url;
            let tags = note
                .tags
                .iter()
                .map(|name| Tag {
                    name: name.clone(),
                    url: format!("{base_url}/tags/{name}"),
                })
                .collect();

            debug!(
                "event=status_convert module=convert status=ok note_id={} depth={}",
                note.id, depth
            );

            Ok(Status {
                id: to_wire_id(&note.id)?,
                uri: note
                    .uri
                    .clone()
                    .unwrap_or_else(|| self.config().note_url(&note.id)),
                url: self.note_canonical_url(note),
                account,
                in_reply_to_id: optional_wire_id(note.reply_id.as_deref())?,
                in_reply_to_account_id: optional_wire_id(note.reply_user_id.as_deref())?,
                reblog,
                quote,
                content,
                plain_content: note.text.clone(),
                created_at: format_timestamp(&note.created_at),
                edited_at,
                emojis,
                replies_count: note.replies_count,
                reblogs_count: note.renote_count,
                favourites_count: note.total_reactions(),
                reblogged: false,
                favourited: note.my_reaction.is_some(),
                muted: false,
                sensitive: note.files.iter().any(|file| file.is_sensitive),
                spoiler_text: note.cw.clone().unwrap_or_default(),
                visibility: to_external_visibility(note.visibility),
                media_attachments,
                mentions,
                tags,
                card: None,
                poll,
                application: None,
                language: note.lang.clone(),
                pinned: None,
                reactions,
                bookmarked: false,
            })
        }
        .boxed()
    }

    /// Resolves mentioned users; failures drop the mention.
    async fn convert_mentions(
        &self,
        note: &NativeNote,
        scope: &mut ConversionScope,
    ) -> Vec<Mention> {
        let mut mentions = Vec::with_capacity(note.mentions.len());
        for user_id in &note.mentions {
            match self.lookup_user(user_id, scope).await {
                Ok(Some(user)) => match self.convert_mention(&user, note) {
                    Ok(mention) => mentions.push(mention),
                    Err(err) => warn!(
                        "event=mention_convert module=convert status=degraded error_code={} note_id={}",
                        err.code(),
                        note.id
                    ),
                },
                Ok(None) => warn!(
                    "event=mention_convert module=convert status=degraded reason=user_missing note_id={}",
                    note.id
                ),
                Err(err) => warn!(
                    "event=mention_convert module=convert status=degraded error_code={} note_id={}",
                    err.code(),
                    note.id
                ),
            }
        }
        mentions
    }

    fn convert_mention(&self, user: &NativeUser, note: &NativeNote) -> BridgeResult<Mention> {
        let url = match user.host.as_deref() {
            Some(host) => note
                .mentioned_remote_users
                .iter()
                .find(|remote| remote.username == user.username && remote.host == host)
                .map(|remote| remote.url.clone().unwrap_or_else(|| remote.uri.clone()))
                .or_else(|| user.url.clone())
                .or_else(|| user.uri.clone())
                .unwrap_or_else(|| BridgeConfig::profile_url(host, &user.username)),
            None => BridgeConfig::profile_url(&self.config().host, &user.username),
        };
        Ok(Mention {
            id: to_wire_id(&user.id)?,
            username: user.username.clone(),
            acct: user.acct(),
            url,
        })
    }

    async fn convert_reactions(
        &self,
        note: &NativeNote,
        scope: &mut ConversionScope,
    ) -> Vec<Reaction> {
        let mut reactions = Vec::with_capacity(note.reactions.len());
        for (key, count) in &note.reactions {
            let me = note.my_reaction.as_deref() == Some(key.as_str());
            if let Some(reaction) = self.convert_reaction(key, *count, me, scope).await {
                reactions.push(reaction);
            }
        }
        reactions
    }

    /// Projects one reaction key; `None` for an unresolvable custom emoji.
    ///
    /// Keys are either a unicode emoji or `:shortcode@host:`, where host `.`
    /// means the local instance.
    pub(crate) async fn convert_reaction(
        &self,
        key: &str,
        count: u64,
        me: bool,
        scope: &mut ConversionScope,
    ) -> Option<Reaction> {
        let Some(inner) = key
            .strip_prefix(':')
            .and_then(|rest| rest.strip_suffix(':'))
        else {
            return Some(Reaction {
                name: key.to_string(),
                count,
                me,
                url: None,
                static_url: None,
            });
        };

        let (shortcode, host) = match inner.split_once('@') {
            Some((shortcode, host)) if host != "." && !host.is_empty() => {
                (shortcode, host.to_string())
            }
            Some((shortcode, _)) => (shortcode, self.config().host.clone()),
            None => (inner, self.config().host.clone()),
        };

        let Some(resolved) = self.lookup_emoji(shortcode, &host, scope).await else {
            warn!(
                "event=reaction_convert module=convert status=degraded reason=emoji_unresolved host={}",
                host
            );
            return None;
        };

        let name = inner.strip_suffix("@.").unwrap_or(inner).to_string();
        Some(Reaction {
            name,
            count,
            me,
            static_url: Some(resolved.url.clone()),
            url: Some(resolved.url),
        })
    }
}
