#![allow(dead_code)]

use async_trait::async_trait;
use mastobridge_core::markup::{HtmlRenderer, MarkupNode, MarkupRenderer, SimpleMarkupParser};
use mastobridge_core::model::edit::EditSnapshot;
use mastobridge_core::model::note::{MentionedRemoteUser, NativeNote};
use mastobridge_core::model::user::NativeUser;
use mastobridge_core::{
    BridgeConfig, BridgeError, BridgeResult, Collaborators, EditSnapshotStore, EmojiResolver,
    MastoConverter, NoteLookup, ResolvedEmoji, UserLookup,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub const LOCAL_HOST: &str = "local.test";

/// In-memory native store with switchable infrastructure failures.
#[derive(Default)]
pub struct Fixture {
    users: Mutex<HashMap<String, NativeUser>>,
    notes: Mutex<HashMap<String, NativeNote>>,
    emojis: Mutex<HashMap<(String, String), ResolvedEmoji>>,
    snapshots: Mutex<Vec<EditSnapshot>>,
    broken_users: Mutex<HashSet<String>>,
    user_fetches: Mutex<Vec<String>>,
}

impl Fixture {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_user(&self, user: NativeUser) {
        self.users.lock().unwrap().insert(user.id.clone(), user);
    }

    pub fn add_note(&self, note: NativeNote) {
        self.notes.lock().unwrap().insert(note.id.clone(), note);
    }

    pub fn add_emoji(&self, shortcode: &str, host: &str, url: &str) {
        self.emojis.lock().unwrap().insert(
            (shortcode.to_string(), host.to_string()),
            ResolvedEmoji {
                url: url.to_string(),
                category: None,
            },
        );
    }

    pub fn add_snapshot(&self, snapshot: EditSnapshot) {
        self.snapshots.lock().unwrap().push(snapshot);
    }

    /// Makes lookups of `user_id` fail as an infrastructure error.
    pub fn break_user(&self, user_id: &str) {
        self.broken_users
            .lock()
            .unwrap()
            .insert(user_id.to_string());
    }

    pub fn user_fetch_count(&self, user_id: &str) -> usize {
        self.user_fetches
            .lock()
            .unwrap()
            .iter()
            .filter(|id| id.as_str() == user_id)
            .count()
    }
}

#[async_trait]
impl UserLookup for Fixture {
    async fn get_user(&self, id: &str) -> BridgeResult<Option<NativeUser>> {
        self.user_fetches.lock().unwrap().push(id.to_string());
        if self.broken_users.lock().unwrap().contains(id) {
            return Err(BridgeError::upstream("user store offline"));
        }
        Ok(self.users.lock().unwrap().get(id).cloned())
    }
}

#[async_trait]
impl NoteLookup for Fixture {
    async fn get_note(&self, id: &str) -> BridgeResult<Option<NativeNote>> {
        Ok(self.notes.lock().unwrap().get(id).cloned())
    }
}

#[async_trait]
impl EmojiResolver for Fixture {
    async fn resolve_emoji(
        &self,
        shortcode: &str,
        host: &str,
    ) -> BridgeResult<Option<ResolvedEmoji>> {
        Ok(self
            .emojis
            .lock()
            .unwrap()
            .get(&(shortcode.to_string(), host.to_string()))
            .cloned())
    }
}

#[async_trait]
impl EditSnapshotStore for Fixture {
    async fn get_edit_snapshots(&self, note_id: &str) -> BridgeResult<Vec<EditSnapshot>> {
        Ok(self
            .snapshots
            .lock()
            .unwrap()
            .iter()
            .filter(|snapshot| snapshot.note_id == note_id)
            .cloned()
            .collect())
    }
}

/// Renderer that always fails, for exercising escape fallbacks.
pub struct FailingRenderer;

#[async_trait]
impl MarkupRenderer for FailingRenderer {
    async fn render(
        &self,
        _nodes: &[MarkupNode],
        _mentioned_remote_users: &[MentionedRemoteUser],
        _inline: bool,
        _quote_uri: Option<&str>,
    ) -> BridgeResult<String> {
        Err(BridgeError::upstream("renderer offline"))
    }
}

pub fn config() -> Arc<BridgeConfig> {
    Arc::new(BridgeConfig::new(LOCAL_HOST).unwrap())
}

pub fn collaborators(
    fixture: &Arc<Fixture>,
    renderer: Arc<dyn MarkupRenderer>,
) -> Collaborators {
    Collaborators {
        users: fixture.clone(),
        notes: fixture.clone(),
        emojis: fixture.clone(),
        snapshots: fixture.clone(),
        parser: Arc::new(SimpleMarkupParser::new()),
        renderer,
    }
}

pub fn converter(fixture: &Arc<Fixture>) -> MastoConverter {
    let config = config();
    let renderer = Arc::new(HtmlRenderer::new(config.url.clone()));
    MastoConverter::new(config, collaborators(fixture, renderer))
}

pub fn converter_with_failing_renderer(fixture: &Arc<Fixture>) -> MastoConverter {
    MastoConverter::new(config(), collaborators(fixture, Arc::new(FailingRenderer)))
}

pub fn local_user(id: &str, username: &str) -> NativeUser {
    NativeUser::new(id, username)
}

pub fn note_by(id: &str, user: &NativeUser, text: Option<&str>) -> NativeNote {
    NativeNote::new(id, user.clone(), text.map(str::to_string))
}
