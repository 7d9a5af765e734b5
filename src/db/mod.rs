//! Session persistence.
//!
//! The session is mirrored under three fixed keys. The browser build keeps them
//! in `localStorage`; native builds keep them in a small SQLite key/value table.
//! Loading is defensive per key: anything missing or malformed resets that one
//! collection to its empty default.

use crate::config::{HISTORY_KEY, NOW_PLAYING_KEY, QUEUE_KEY};
use crate::session::{HistoryRecord, NowPlaying, QueueEntry, Session};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[cfg(target_arch = "wasm32")]
pub use wasm_impl::BrowserStore;

#[cfg(not(target_arch = "wasm32"))]
pub use native_impl::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("malformed stored value: {0}")]
    Malformed(#[from] serde_json::Error),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// A flat JSON key/value store.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn write(&self, key: &str, value: &Value) -> Result<(), StoreError>;
}

/// In-process store, used by tests and as the native fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw, possibly malformed, value.
    pub fn insert_raw(&self, key: &str, raw: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
    }

    #[cfg(test)]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        match self.values.borrow().get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.insert_raw(key, &serde_json::to_string(value)?);
        Ok(())
    }
}

/// The store for the current platform.
pub fn default_store() -> Rc<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(BrowserStore)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match SqliteStore::open_default() {
            Ok(store) => Rc::new(store),
            Err(err) => {
                warn!("falling back to in-memory session store: {err}");
                Rc::new(MemoryStore::new())
            }
        }
    }
}

fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    let value = match store.read(key) {
        Ok(Some(value)) => value,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!(key, "discarding unreadable session data: {err}");
            return T::default();
        }
    };

    serde_json::from_value(value).unwrap_or_else(|err| {
        warn!(key, "discarding malformed session data: {err}");
        T::default()
    })
}

pub fn load_session(store: &dyn KeyValueStore) -> Session {
    let queue: Vec<QueueEntry> = load_or_default(store, QUEUE_KEY);
    let now_playing: Option<NowPlaying> = load_or_default(store, NOW_PLAYING_KEY);
    let history: Vec<HistoryRecord> = load_or_default(store, HISTORY_KEY);

    info!(
        queued = queue.len(),
        on_stage = now_playing.is_some(),
        history = history.len(),
        "session loaded"
    );
    Session::new(queue, now_playing, history)
}

fn save_value<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    store.write(key, &serde_json::to_value(value)?)
}

pub fn save_queue(store: &dyn KeyValueStore, queue: &[QueueEntry]) -> Result<(), StoreError> {
    save_value(store, QUEUE_KEY, queue)
}

pub fn save_now_playing(
    store: &dyn KeyValueStore,
    now_playing: Option<&NowPlaying>,
) -> Result<(), StoreError> {
    save_value(store, NOW_PLAYING_KEY, &now_playing)
}

pub fn save_history(store: &dyn KeyValueStore, history: &[HistoryRecord]) -> Result<(), StoreError> {
    save_value(store, HISTORY_KEY, history)
}

/// Writes all three keys. Each key is attempted even if an earlier one fails;
/// the first error is returned.
pub fn save_session(store: &dyn KeyValueStore, session: &Session) -> Result<(), StoreError> {
    let results = [
        save_queue(store, &session.queue),
        save_now_playing(store, session.now_playing.as_ref()),
        save_history(store, &session.history),
    ];
    debug!("session saved");
    results.into_iter().collect()
}

#[cfg(target_arch = "wasm32")]
mod wasm_impl {
    use super::*;
    use gloo_storage::errors::StorageError;
    use gloo_storage::{LocalStorage, Storage};

    /// `window.localStorage`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserStore;

    impl KeyValueStore for BrowserStore {
        fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
            let stored: Result<Value, StorageError> = LocalStorage::get(key);
            match stored {
                Ok(value) => Ok(Some(value)),
                Err(StorageError::KeyNotFound(_)) => Ok(None),
                Err(StorageError::SerdeError(err)) => Err(StoreError::Malformed(err)),
                Err(err) => Err(StoreError::Unavailable(err.to_string())),
            }
        }

        fn write(&self, key: &str, value: &Value) -> Result<(), StoreError> {
            LocalStorage::set(key, value).map_err(|err| StoreError::Unavailable(err.to_string()))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_impl {
    use super::*;
    use crate::config::{DATABASE_FILE_NAME, DATA_DIR_NAME};
    use rusqlite::{params, Connection, OptionalExtension};
    use std::fs;
    use std::path::{Path, PathBuf};

    pub struct SqliteStore {
        conn: Connection,
    }

    impl SqliteStore {
        pub fn open(path: &Path) -> Result<Self, StoreError> {
            let conn = Connection::open(path)?;
            Self::initialize(conn)
        }

        #[cfg(test)]
        pub fn open_in_memory() -> Result<Self, StoreError> {
            Self::initialize(Connection::open_in_memory()?)
        }

        pub fn open_default() -> Result<Self, StoreError> {
            let path = Self::default_path()
                .ok_or_else(|| StoreError::Unavailable("no data directory".to_string()))?;
            info!(path = %path.display(), "opening session database");
            Self::open(&path)
        }

        fn default_path() -> Option<PathBuf> {
            let dir = dirs::data_dir()?.join(DATA_DIR_NAME);
            fs::create_dir_all(&dir).ok()?;
            Some(dir.join(DATABASE_FILE_NAME))
        }

        fn initialize(conn: Connection) -> Result<Self, StoreError> {
            conn.execute(
                "CREATE TABLE IF NOT EXISTS session (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                )",
                [],
            )?;
            Ok(Self { conn })
        }

        /// Seeds a raw, possibly malformed, value.
        pub fn write_raw(&self, key: &str, raw: &str) -> Result<(), StoreError> {
            self.conn.execute(
                "INSERT OR REPLACE INTO session (key, value) VALUES (?1, ?2)",
                params![key, raw],
            )?;
            Ok(())
        }
    }

    impl KeyValueStore for SqliteStore {
        fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
            let raw: Option<String> = self
                .conn
                .query_row(
                    "SELECT value FROM session WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;

            match raw {
                Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
                None => Ok(None),
            }
        }

        fn write(&self, key: &str, value: &Value) -> Result<(), StoreError> {
            self.write_raw(key, &serde_json::to_string(value)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SESSION_KEYS;
    use crate::session::EntryDraft;

    fn busy_session() -> Session {
        let mut session = Session::default();
        for singer in ["Ada", "Bob", "Cy"] {
            session
                .enqueue(&EntryDraft::new(singer, "Song").with_key("+2"), 1_000)
                .unwrap();
        }
        session.promote_next(2_000);
        session.finish("85", "lovely", 62_000).unwrap();
        session.promote_next(62_000);
        session.toggle_pause(70_000);
        session
    }

    #[test]
    fn test_empty_store_loads_empty_session() {
        let store = MemoryStore::new();
        assert_eq!(load_session(&store), Session::default());
    }

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::new();
        let session = busy_session();
        save_session(&store, &session).unwrap();

        assert_eq!(load_session(&store), session);
    }

    #[test]
    fn test_empty_stage_is_stored_as_null() {
        let store = MemoryStore::new();
        save_session(&store, &Session::default()).unwrap();

        assert_eq!(store.raw(NOW_PLAYING_KEY).as_deref(), Some("null"));
        assert_eq!(store.raw(QUEUE_KEY).as_deref(), Some("[]"));
        for key in SESSION_KEYS {
            assert!(store.raw(key).is_some());
        }
    }

    #[test]
    fn test_malformed_key_resets_only_that_collection() {
        let store = MemoryStore::new();
        let session = busy_session();
        save_session(&store, &session).unwrap();
        store.insert_raw(QUEUE_KEY, "{not json");
        store.insert_raw(NOW_PLAYING_KEY, r#""nobody""#);

        let loaded = load_session(&store);
        assert!(loaded.queue.is_empty());
        assert!(loaded.now_playing.is_none());
        assert_eq!(loaded.history, session.history);
    }

    #[test]
    fn test_wrong_shape_resets_to_default() {
        let store = MemoryStore::new();
        store.insert_raw(QUEUE_KEY, r#"{"id": "x"}"#);
        store.insert_raw(HISTORY_KEY, r#"[{"id": 5}]"#);

        let loaded = load_session(&store);
        assert!(loaded.queue.is_empty());
        assert!(loaded.history.is_empty());
    }

    #[test]
    fn test_loads_camel_case_layout() {
        let store = MemoryStore::new();
        store.insert_raw(
            QUEUE_KEY,
            r#"[{"id":"q1","singer":"Ada","song":"Volare","notes":"","key":"-1","addedAt":1700000000000}]"#,
        );
        store.insert_raw(
            NOW_PLAYING_KEY,
            r#"{"id":"n1","singer":"Bob","song":"My Way","notes":"for Carla","key":"","addedAt":1,
                "startedAt":1000,"paused":true,"pauseAccum":500,"lastTick":4000}"#,
        );
        store.insert_raw(
            HISTORY_KEY,
            r#"[{"id":"h1","singer":"Cy","song":"Azzurro","notes":"","key":"","startedAt":0,
                "endedAt":95000,"durationSec":95,"score":null,"comment":"","skipped":true}]"#,
        );

        let loaded = load_session(&store);
        assert_eq!(loaded.queue[0].key, "-1");
        assert_eq!(loaded.queue[0].added_at, 1_700_000_000_000);

        let np = loaded.now_playing.unwrap();
        assert_eq!(np.id(), "n1");
        assert!(np.paused);
        assert_eq!(np.pause_accum, 500);
        assert_eq!(np.last_tick, 4_000);

        assert!(loaded.history[0].skipped);
        assert_eq!(loaded.history[0].score, None);
        assert_eq!(loaded.history[0].duration_sec, 95);
    }

    #[test]
    fn test_loose_scores_keep_history() {
        let store = MemoryStore::new();
        store.insert_raw(
            HISTORY_KEY,
            r#"[{"id":"h2","singer":"Ada","song":"Volare","startedAt":0,"endedAt":60000,
                "durationSec":60,"score":85.5,"comment":"","skipped":false},
                {"id":"h1","singer":"Bob","song":"My Way","startedAt":0,"endedAt":30000,
                "durationSec":30,"score":72,"comment":"","skipped":false},
                {"id":"h0","singer":"Cy","song":"Azzurro","startedAt":0,"endedAt":10000,
                "durationSec":10,"score":"great","comment":"","skipped":false},
                {"id":"hx","singer":"Di","song":"Mambo","startedAt":0,"endedAt":10000,
                "durationSec":10,"score":140,"comment":"","skipped":false}]"#,
        );

        let history = load_session(&store).history;
        let scores: Vec<_> = history.iter().map(|record| record.score).collect();
        assert_eq!(scores, vec![Some(86), Some(72), None, Some(100)]);
    }

    #[test]
    fn test_extreme_stage_stamps_load_and_tick() {
        let store = MemoryStore::new();
        store.insert_raw(
            NOW_PLAYING_KEY,
            r#"{"id":"n1","singer":"Bob","song":"My Way","startedAt":-9223372036854775808,
                "paused":true,"pauseAccum":9223372036854775807,"lastTick":-9223372036854775808}"#,
        );

        let mut session = load_session(&store);
        let np = session.now_playing.as_ref().unwrap();
        assert_eq!(np.elapsed_secs(1_700_000_000_000), 0);

        session.toggle_pause(1_700_000_000_000);
        let record = session.skip(1_700_000_000_500).unwrap();
        assert!(record.skipped);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_sqlite_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("karaoke.db");
        let session = busy_session();

        {
            let store = SqliteStore::open(&path).unwrap();
            save_session(&store, &session).unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(load_session(&reopened), session);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_sqlite_malformed_value_falls_back() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.write_raw(HISTORY_KEY, "oops").unwrap();

        assert!(load_session(&store).history.is_empty());
    }
}
