//! Compile-time configuration for Karaoke Night.

/// Storage key for the waiting queue (JSON array).
pub const QUEUE_KEY: &str = "karaoke_queue_v1";
/// Storage key for the act on stage (JSON object or `null`).
pub const NOW_PLAYING_KEY: &str = "karaoke_now_v1";
/// Storage key for finished and skipped acts (JSON array, newest first).
pub const HISTORY_KEY: &str = "karaoke_history_v1";

/// Every key the session is mirrored under.
#[cfg(test)]
pub const SESSION_KEYS: [&str; 3] = [QUEUE_KEY, NOW_PLAYING_KEY, HISTORY_KEY];

/// How often the stage clock re-renders.
pub const TICK_INTERVAL_MS: u64 = 1_000;

/// Highest score a performance can be given.
pub const MAX_SCORE: u8 = 100;

#[cfg(not(target_arch = "wasm32"))]
pub const DATA_DIR_NAME: &str = "karaoke-night";
#[cfg(not(target_arch = "wasm32"))]
pub const DATABASE_FILE_NAME: &str = "karaoke.db";
