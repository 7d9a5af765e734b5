//! Wall-clock helpers and the stage elapsed-time math.
//!
//! Nothing here stores a running duration: elapsed time is always derived from
//! `started_at`, the accumulated pause time and, while paused, the start of the
//! current pause.

use super::NowPlaying;
use chrono::{Local, TimeZone, Utc};

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl NowPlaying {
    /// Milliseconds spent paused up to `now`, including a pause still in progress.
    pub fn paused_millis(&self, now: i64) -> i64 {
        let open_pause = if self.paused {
            now.saturating_sub(self.last_tick).max(0)
        } else {
            0
        };
        self.pause_accum.max(0).saturating_add(open_pause)
    }

    pub fn elapsed_millis(&self, now: i64) -> i64 {
        now.saturating_sub(self.started_at)
            .saturating_sub(self.paused_millis(now))
            .max(0)
    }

    pub fn elapsed_secs(&self, now: i64) -> u64 {
        (self.elapsed_millis(now) / 1000) as u64
    }

    /// Pausing stamps the pause start; resuming folds the pause into `pause_accum`.
    pub fn toggle_pause(&mut self, now: i64) {
        if self.paused {
            let pause = now.saturating_sub(self.last_tick).max(0);
            self.pause_accum = self.pause_accum.saturating_add(pause);
            self.paused = false;
        } else {
            self.paused = true;
        }
        self.last_tick = now;
    }
}

pub fn format_duration(seconds: u64) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

/// Local wall-clock time of an epoch-millisecond timestamp, e.g. `21:47:03`.
pub fn format_clock_time(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}
