//! Account projection and credential update translation.

use super::{format_timestamp, ConversionScope, MastoConverter};
use crate::config::BridgeConfig;
use crate::crosswalk::{to_external_visibility, to_native_visibility, ExternalVisibility};
use crate::entity::{Account, AccountSource, Emoji, Field, UpdateCredentialsRequest};
use crate::error::{BridgeError, BridgeResult};
use crate::id::to_wire_id;
use crate::markup::escape_markup;
use crate::model::social::NativeProfileUpdate;
use crate::model::user::{NativeUser, ProfileField};
use log::warn;

const PLACEHOLDER_ID: &str = "1";
const PLACEHOLDER_USERNAME: &str = "none";
const PLACEHOLDER_CREATED_AT: &str = "1971-01-01T00:00:00.000Z";

impl MastoConverter {
    /// Projects a native user into a wire account.
    pub async fn convert_account(&self, user: &NativeUser) -> BridgeResult<Account> {
        let mut scope = ConversionScope::new();
        self.convert_account_in(user, &mut scope).await
    }

    /// Own account of the requester, with the unrendered `source` block.
    pub async fn convert_credential_account(&self, user: &NativeUser) -> BridgeResult<Account> {
        let mut account = self.convert_account(user).await?;
        account.source = Some(AccountSource {
            privacy: to_external_visibility(user.default_visibility)
                .as_str()
                .to_string(),
            sensitive: user.always_mark_nsfw,
            language: user.lang.clone().unwrap_or_default(),
            note: user.description.clone().unwrap_or_default(),
            fields: user
                .fields
                .iter()
                .map(|field| Field {
                    name: field.name.clone(),
                    value: field.value.clone(),
                    verified_at: None,
                })
                .collect(),
        });
        Ok(account)
    }

    pub(crate) async fn convert_account_in(
        &self,
        user: &NativeUser,
        scope: &mut ConversionScope,
    ) -> BridgeResult<Account> {
        let config = self.config();
        let host = user.effective_host(&config.host).to_string();

        let url = user
            .url
            .clone()
            .or_else(|| user.uri.clone())
            .unwrap_or_else(|| BridgeConfig::profile_url(&host, &user.username));

        let display_name = match user.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => user.username.clone(),
        };

        let note = match user.description.as_deref() {
            Some(description) if !description.is_empty() => {
                self.render_profile_text(&user.id, description, false).await
            }
            _ => String::new(),
        };

        let mut fields = Vec::with_capacity(user.fields.len());
        for field in &user.fields {
            fields.push(Field {
                name: field.name.clone(),
                value: self.render_profile_text(&user.id, &field.value, true).await,
                verified_at: None,
            });
        }

        let emojis = self.convert_emojis(&user.emojis, &host, scope).await;

        let avatar = user
            .avatar_url
            .clone()
            .unwrap_or_else(|| config.avatar_placeholder_url.clone());
        let header = user
            .banner_url
            .clone()
            .unwrap_or_else(|| config.header_placeholder_url.clone());

        Ok(Account {
            id: to_wire_id(&user.id)?,
            username: user.username.clone(),
            acct: user.acct(),
            display_name,
            locked: user.is_locked,
            bot: user.is_bot,
            discoverable: user.is_explorable,
            group: false,
            created_at: format_timestamp(&user.created_at),
            note,
            url,
            avatar_static: avatar.clone(),
            avatar,
            header_static: header.clone(),
            header,
            followers_count: user.followers_count,
            following_count: user.following_count,
            statuses_count: user.notes_count,
            last_status_at: user
                .last_note_at
                .map(|at| at.format("%Y-%m-%d").to_string()),
            emojis,
            fields,
            moved: None,
            source: None,
        })
    }

    /// Renders profile text; a renderer failure degrades to escaped text.
    async fn render_profile_text(&self, user_id: &str, text: &str, inline: bool) -> String {
        match self.render_text(text, &[], inline, None).await {
            Ok(html) => html,
            Err(err) => {
                warn!(
                    "event=profile_render module=convert status=degraded error_code={} user_id={}",
                    err.code(),
                    user_id
                );
                escape_markup(text)
            }
        }
    }

    /// Resolves custom emoji shortcodes on `host`; unresolved ones are dropped.
    pub(crate) async fn convert_emojis(
        &self,
        shortcodes: &[String],
        host: &str,
        scope: &mut ConversionScope,
    ) -> Vec<Emoji> {
        let mut emojis = Vec::with_capacity(shortcodes.len());
        for shortcode in shortcodes {
            match self.lookup_emoji(shortcode, host, scope).await {
                Some(resolved) => emojis.push(Emoji {
                    shortcode: shortcode.clone(),
                    static_url: resolved.url.clone(),
                    url: resolved.url,
                    visible_in_picker: true,
                    category: resolved.category,
                }),
                None => warn!(
                    "event=emoji_convert module=convert status=degraded host={} reason=unresolved",
                    host
                ),
            }
        }
        emojis
    }
}

/// Stand-in actor for notifications that carry none.
pub fn placeholder_account(config: &BridgeConfig) -> Account {
    Account {
        id: PLACEHOLDER_ID.to_string(),
        username: PLACEHOLDER_USERNAME.to_string(),
        acct: PLACEHOLDER_USERNAME.to_string(),
        display_name: PLACEHOLDER_USERNAME.to_string(),
        locked: false,
        bot: true,
        discoverable: false,
        group: false,
        created_at: PLACEHOLDER_CREATED_AT.to_string(),
        note: String::new(),
        url: config.url.clone(),
        avatar: config.avatar_placeholder_url.clone(),
        avatar_static: config.avatar_placeholder_url.clone(),
        header: config.header_placeholder_url.clone(),
        header_static: config.header_placeholder_url.clone(),
        followers_count: 0,
        following_count: 0,
        statuses_count: 0,
        last_status_at: None,
        emojis: Vec::new(),
        fields: Vec::new(),
        moved: None,
        source: None,
    }
}

/// Translates a wire credential update into a native profile update.
///
/// # Errors
/// - `InvalidInput` for an unknown `source.privacy` value.
pub fn to_native_profile_update(
    request: &UpdateCredentialsRequest,
) -> BridgeResult<NativeProfileUpdate> {
    let source = request.source.clone().unwrap_or_default();

    let default_visibility = source
        .privacy
        .as_deref()
        .map(|privacy| {
            ExternalVisibility::parse(privacy)
                .map(to_native_visibility)
                .ok_or_else(|| BridgeError::InvalidInput(format!("unknown privacy `{privacy}`")))
        })
        .transpose()?;

    let fields = request.fields_attributes.as_ref().map(|attributes| {
        attributes
            .iter()
            .filter(|attr| !(attr.name.trim().is_empty() && attr.value.trim().is_empty()))
            .map(|attr| ProfileField {
                name: attr.name.clone(),
                value: attr.value.clone(),
            })
            .collect()
    });

    Ok(NativeProfileUpdate {
        name: request.display_name.clone(),
        description: request.note.clone(),
        is_bot: request.bot,
        is_locked: request.locked,
        is_explorable: request.discoverable,
        lang: source.language,
        always_mark_nsfw: source.sensitive,
        default_visibility,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::{placeholder_account, to_native_profile_update};
    use crate::config::BridgeConfig;
    use crate::crosswalk::NativeVisibility;
    use crate::entity::{CredentialSource, FieldAttribute, UpdateCredentialsRequest};
    use crate::error::ErrorKind;

    #[test]
    fn placeholder_uses_configured_media() {
        let config = BridgeConfig::new("local.test").unwrap();
        let account = placeholder_account(&config);
        assert_eq!(account.id, "1");
        assert_eq!(account.acct, "none");
        assert_eq!(account.avatar, config.avatar_placeholder_url);
    }

    #[test]
    fn profile_update_maps_privacy_and_drops_blank_fields() {
        let request = UpdateCredentialsRequest {
            display_name: Some("Amy".to_string()),
            locked: Some(true),
            source: Some(CredentialSource {
                privacy: Some("private".to_string()),
                sensitive: Some(true),
                language: Some("en".to_string()),
            }),
            fields_attributes: Some(vec![
                FieldAttribute {
                    name: "site".to_string(),
                    value: "https://amy.test".to_string(),
                },
                FieldAttribute::default(),
            ]),
            ..UpdateCredentialsRequest::default()
        };

        let update = to_native_profile_update(&request).unwrap();
        assert_eq!(update.name.as_deref(), Some("Amy"));
        assert_eq!(update.is_locked, Some(true));
        assert_eq!(update.default_visibility, Some(NativeVisibility::Followers));
        assert_eq!(update.always_mark_nsfw, Some(true));
        assert_eq!(update.fields.as_ref().map(Vec::len), Some(1));
        assert_eq!(update.is_bot, None);
    }

    #[test]
    fn empty_request_is_an_empty_update() {
        let update = to_native_profile_update(&UpdateCredentialsRequest::default()).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn unknown_privacy_is_rejected() {
        let request = UpdateCredentialsRequest {
            source: Some(CredentialSource {
                privacy: Some("friends".to_string()),
                ..CredentialSource::default()
            }),
            ..UpdateCredentialsRequest::default()
        };
        let err = to_native_profile_update(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidId);
        assert_eq!(err.http_status(), 400);
    }
}
