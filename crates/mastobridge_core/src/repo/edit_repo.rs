//! SQLite-backed edit snapshot store.
//!
//! # Responsibility
//! - Record one row per note edit.
//! - Serve snapshots for the edit history translator.
//!
//! # Invariants
//! - Rows are returned ordered by `updated_at ASC`, insertion order breaking
//!   ties.
//! - `files_json` always holds a JSON array of `NativeFile`.

use crate::collab::EditSnapshotStore;
use crate::db::DbError;
use crate::error::{BridgeError, BridgeResult};
use crate::id::is_native_id;
use crate::model::edit::EditSnapshot;
use crate::model::note::NativeFile;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::error;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

const SNAPSHOT_SELECT_SQL: &str = "SELECT
    id,
    note_id,
    old_text,
    new_text,
    cw,
    files_json,
    updated_at
FROM note_edit";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Id outside the native alphabet.
    InvalidId(String),
    InvalidData(String),
    /// Connection mutex was poisoned by a panicking writer.
    Poisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidId(value) => write!(f, "invalid snapshot id: `{value}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted snapshot data: {message}"),
            Self::Poisoned => write!(f, "snapshot connection lock poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RepoError> for BridgeError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::InvalidId(id) => Self::InvalidId(id),
            other => Self::upstream(format!("snapshot store: {other}")),
        }
    }
}

/// Snapshot store over one SQLite connection.
pub struct SqliteEditSnapshotStore {
    conn: Mutex<Connection>,
}

impl SqliteEditSnapshotStore {
    /// Wraps a connection returned by `db::open_db`/`open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Persists one snapshot. Re-recording an id replaces the row.
    pub fn record_snapshot(&self, snapshot: &EditSnapshot) -> RepoResult<()> {
        for id in [&snapshot.id, &snapshot.note_id] {
            if !is_native_id(id) {
                return Err(RepoError::InvalidId(id.clone()));
            }
        }
        let files_json = serde_json::to_string(&snapshot.files)
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;

        self.lock()?.execute(
            "INSERT OR REPLACE INTO note_edit (
                id,
                note_id,
                old_text,
                new_text,
                cw,
                files_json,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                snapshot.id.as_str(),
                snapshot.note_id.as_str(),
                snapshot.old_text.as_deref(),
                snapshot.new_text.as_deref(),
                snapshot.cw.as_deref(),
                files_json,
                snapshot.updated_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    /// Snapshots of `note_id`, oldest first.
    pub fn list_snapshots(&self, note_id: &str) -> RepoResult<Vec<EditSnapshot>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "{SNAPSHOT_SELECT_SQL} WHERE note_id = ?1 ORDER BY updated_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query(params![note_id])?;

        let mut snapshots = Vec::new();
        while let Some(row) = rows.next()? {
            snapshots.push(parse_snapshot_row(row)?);
        }
        Ok(snapshots)
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepoError::Poisoned)
    }
}

#[async_trait]
impl EditSnapshotStore for SqliteEditSnapshotStore {
    async fn get_edit_snapshots(&self, note_id: &str) -> BridgeResult<Vec<EditSnapshot>> {
        self.list_snapshots(note_id).map_err(|err| {
            error!(
                "event=snapshot_list module=repo status=error note_id={} error={}",
                note_id, err
            );
            BridgeError::from(err)
        })
    }
}

fn parse_snapshot_row(row: &Row<'_>) -> RepoResult<EditSnapshot> {
    let files_json: String = row.get(5)?;
    let files: Vec<NativeFile> = serde_json::from_str(&files_json)
        .map_err(|err| RepoError::InvalidData(format!("files_json: {err}")))?;

    let updated_at_ms: i64 = row.get(6)?;
    let updated_at = DateTime::<Utc>::from_timestamp_millis(updated_at_ms)
        .ok_or_else(|| RepoError::InvalidData(format!("updated_at out of range: {updated_at_ms}")))?;

    Ok(EditSnapshot {
        id: row.get(0)?,
        note_id: row.get(1)?,
        old_text: row.get(2)?,
        new_text: row.get(3)?,
        cw: row.get(4)?,
        files,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::{RepoError, SqliteEditSnapshotStore};
    use crate::db::open_db_in_memory;
    use crate::model::edit::EditSnapshot;
    use chrono::{TimeZone, Utc};

    fn snapshot(id: &str, note_id: &str, minute: u32) -> EditSnapshot {
        EditSnapshot {
            id: id.to_string(),
            note_id: note_id.to_string(),
            old_text: Some(format!("v{minute}")),
            new_text: None,
            cw: None,
            files: Vec::new(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, minute, 0).unwrap(),
        }
    }

    #[test]
    fn lists_snapshots_of_one_note_in_time_order() {
        let store = SqliteEditSnapshotStore::new(open_db_in_memory().unwrap());
        store.record_snapshot(&snapshot("e2", "n1", 5)).unwrap();
        store.record_snapshot(&snapshot("e1", "n1", 1)).unwrap();
        store.record_snapshot(&snapshot("e3", "n2", 0)).unwrap();

        let listed = store.list_snapshots("n1").unwrap();
        let ids = listed.iter().map(|s| s.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["e1", "e2"]);
        assert_eq!(listed[0].old_text.as_deref(), Some("v1"));
        assert!(store.list_snapshots("zz").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_native_ids() {
        let store = SqliteEditSnapshotStore::new(open_db_in_memory().unwrap());
        let err = store
            .record_snapshot(&snapshot("bad id", "n1", 0))
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidId(_)));
    }
}
