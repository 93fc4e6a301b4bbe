mod common;

use chrono::{TimeZone, Utc};
use common::{collaborators, config, converter, local_user, note_by, Fixture};
use mastobridge_core::db::open_db;
use mastobridge_core::entity::AttachmentType;
use mastobridge_core::markup::HtmlRenderer;
use mastobridge_core::model::edit::EditSnapshot;
use mastobridge_core::model::note::NativeFile;
use mastobridge_core::{
    EditHistoryTranslator, ErrorKind, MastoConverter, SqliteEditSnapshotStore,
};
use std::sync::Arc;

fn image(id: &str, sensitive: bool) -> NativeFile {
    NativeFile {
        id: id.to_string(),
        name: format!("{id}.png"),
        mime_type: "image/png".to_string(),
        url: format!("https://local.test/files/{id}.png"),
        thumbnail_url: None,
        blurhash: None,
        comment: None,
        is_sensitive: sensitive,
        width: Some(10),
        height: Some(10),
    }
}

fn snapshot(id: &str, note_id: &str, minute: u32, text: &str, files: Vec<NativeFile>) -> EditSnapshot {
    EditSnapshot {
        id: id.to_string(),
        note_id: note_id.to_string(),
        old_text: Some(text.to_string()),
        new_text: None,
        cw: None,
        files,
        updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, minute, 0).unwrap(),
    }
}

#[tokio::test]
async fn history_is_oldest_first_and_excludes_current_state() {
    let fixture = Fixture::new();
    let amy = local_user("a1", "amy");
    let mut current = note_by("n1", &amy, Some("third draft"));
    current.files = vec![image("f3", false)];
    fixture.add_note(current);
    fixture.add_snapshot(snapshot("e2", "n1", 20, "second draft", vec![image("f2", true)]));
    fixture.add_snapshot(snapshot("e1", "n1", 10, "first draft", vec![image("f1", false)]));

    let history = EditHistoryTranslator::new(converter(&fixture))
        .status_history("n1")
        .await
        .unwrap();

    assert_eq!(history.len(), 2);
    assert!(history[0].content.contains("first draft"));
    assert!(history[1].content.contains("second draft"));
    assert!(history.iter().all(|entry| !entry.content.contains("third")));
    assert_eq!(history[0].created_at, "2024-06-01T09:10:00.000Z");
    assert_eq!(history[0].media_attachments[0].url, "https://local.test/files/f1.png");
    assert_eq!(history[0].media_attachments[0].kind, AttachmentType::Image);
    assert!(!history[0].sensitive);
    assert!(history[1].sensitive);
    assert_eq!(history[1].account.username, "amy");
    assert!(history[1].poll.is_none());
}

#[tokio::test]
async fn never_edited_note_has_empty_history() {
    let fixture = Fixture::new();
    fixture.add_note(note_by("n2", &local_user("a1", "amy"), Some("pristine")));

    let history = EditHistoryTranslator::new(converter(&fixture))
        .status_history("n2")
        .await
        .unwrap();

    assert!(history.is_empty());
}

#[tokio::test]
async fn unknown_note_is_not_found() {
    let fixture = Fixture::new();
    let err = EditHistoryTranslator::new(converter(&fixture))
        .status_history("n404")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn history_reads_snapshots_from_sqlite_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshots.sqlite3");

    {
        let store = SqliteEditSnapshotStore::new(open_db(&path).unwrap());
        store
            .record_snapshot(&snapshot("e1", "n1", 5, "before", vec![image("f1", false)]))
            .unwrap();
        store
            .record_snapshot(&snapshot("e2", "n1", 1, "earliest", Vec::new()))
            .unwrap();
    }

    let fixture = Fixture::new();
    fixture.add_note(note_by("n1", &local_user("a1", "amy"), Some("now")));
    let mut collab = collaborators(&fixture, Arc::new(HtmlRenderer::new("https://local.test")));
    collab.snapshots = Arc::new(SqliteEditSnapshotStore::new(open_db(&path).unwrap()));
    let translator = EditHistoryTranslator::new(MastoConverter::new(config(), collab));

    let history = translator.status_history("n1").await.unwrap();

    let texts = history
        .iter()
        .map(|entry| entry.plain_content.as_deref().unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(texts, vec!["earliest", "before"]);
    assert_eq!(history[1].media_attachments.len(), 1);
}
