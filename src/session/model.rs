use crate::config::MAX_SCORE;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntryDraft {
    pub singer: String,
    pub song: String,
    pub notes: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("singer name is required")]
    MissingSinger,
    #[error("song title is required")]
    MissingSong,
}

impl EntryDraft {
    pub fn new(singer: impl Into<String>, song: impl Into<String>) -> Self {
        Self {
            singer: singer.into(),
            song: song.into(),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    #[cfg(test)]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn is_submittable(&self) -> bool {
        !self.singer.trim().is_empty() && !self.song.trim().is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Trims every field and stamps a fresh id.
    pub fn to_entry(&self, added_at: i64) -> Result<QueueEntry, DraftError> {
        let singer = self.singer.trim();
        if singer.is_empty() {
            return Err(DraftError::MissingSinger);
        }
        let song = self.song.trim();
        if song.is_empty() {
            return Err(DraftError::MissingSong);
        }

        Ok(QueueEntry {
            id: uuid::Uuid::new_v4().to_string(),
            singer: singer.to_string(),
            song: song.to_string(),
            notes: self.notes.trim().to_string(),
            key: self.key.trim().to_string(),
            added_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: String,
    pub singer: String,
    pub song: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub added_at: i64,
}

impl QueueEntry {
    /// "Key: -1 • notes" style subtitle, empty when neither is set.
    pub fn details(&self) -> String {
        match (self.key.is_empty(), self.notes.is_empty()) {
            (true, true) => String::new(),
            (false, true) => format!("Key: {}", self.key),
            (true, false) => self.notes.clone(),
            (false, false) => format!("Key: {} • {}", self.key, self.notes),
        }
    }
}

/// The act on stage. Times are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    #[serde(flatten)]
    pub entry: QueueEntry,
    pub started_at: i64,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub pause_accum: i64,
    #[serde(default)]
    pub last_tick: i64,
}

impl NowPlaying {
    pub fn start(entry: QueueEntry, now: i64) -> Self {
        Self {
            entry,
            started_at: now,
            paused: false,
            pause_accum: 0,
            last_tick: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.entry.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: String,
    pub singer: String,
    pub song: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub key: String,
    pub started_at: i64,
    pub ended_at: i64,
    #[serde(default)]
    pub duration_sec: u64,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<u8>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub skipped: bool,
}

/// Older saves may hold fractional or out-of-range scores. Those are rounded
/// and clamped; anything that is not a finite number reads as no score.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|score| score.is_finite())
        .map(|score| score.round().clamp(0.0, f64::from(MAX_SCORE)) as u8))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub singers: usize,
    pub performances: usize,
}
