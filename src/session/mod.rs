//! The karaoke session: waiting queue, the act on stage and the performance log.
//!
//! Every operation takes the current time as epoch milliseconds so the whole
//! model can be driven deterministically from tests.

mod clock;
mod model;
mod score;

pub use clock::*;
pub use model::*;
pub use score::*;

use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub queue: Vec<QueueEntry>,
    pub now_playing: Option<NowPlaying>,
    pub history: Vec<HistoryRecord>,
}

impl Session {
    pub fn new(
        queue: Vec<QueueEntry>,
        now_playing: Option<NowPlaying>,
        history: Vec<HistoryRecord>,
    ) -> Self {
        Self {
            queue,
            now_playing,
            history,
        }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.queue.iter().position(|entry| entry.id == id)
    }

    pub fn enqueue(&mut self, draft: &EntryDraft, now: i64) -> Result<QueueEntry, DraftError> {
        let entry = draft.to_entry(now)?;
        debug!(id = %entry.id, singer = %entry.singer, "queued");
        self.queue.push(entry.clone());
        Ok(entry)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.queue.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Swaps the entry with its neighbour. Returns false at either end.
    pub fn move_entry(&mut self, id: &str, direction: Direction) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let target = match direction {
            Direction::Up => idx.checked_sub(1),
            Direction::Down => Some(idx + 1).filter(|next| *next < self.queue.len()),
        };
        match target {
            Some(target) => {
                self.queue.swap(idx, target);
                true
            }
            None => false,
        }
    }

    /// Moves any queued entry onto the stage.
    pub fn promote(&mut self, id: &str, now: i64) -> Option<&NowPlaying> {
        let idx = self.position(id)?;
        let entry = self.queue.remove(idx);
        Some(self.put_on_stage(entry, now))
    }

    pub fn promote_next(&mut self, now: i64) -> Option<&NowPlaying> {
        if self.queue.is_empty() {
            return None;
        }
        let entry = self.queue.remove(0);
        Some(self.put_on_stage(entry, now))
    }

    /// Starts a fresh entry on stage without touching the queue.
    pub fn start_now(&mut self, draft: &EntryDraft, now: i64) -> Result<&NowPlaying, DraftError> {
        let entry = draft.to_entry(now)?;
        Ok(self.put_on_stage(entry, now))
    }

    /// Returns the new paused state, or `None` with nobody on stage.
    pub fn toggle_pause(&mut self, now: i64) -> Option<bool> {
        let np = self.now_playing.as_mut()?;
        np.toggle_pause(now);
        Some(np.paused)
    }

    /// Closes the act on stage with an optional score and comment.
    ///
    /// A bad score leaves the session untouched. `Ok(None)` means the stage was empty.
    pub fn finish(
        &mut self,
        score_input: &str,
        comment: &str,
        now: i64,
    ) -> Result<Option<&HistoryRecord>, ScoreError> {
        let score = parse_score(score_input)?;
        Ok(self.close_act(score, comment.trim(), false, now))
    }

    pub fn skip(&mut self, now: i64) -> Option<&HistoryRecord> {
        self.close_act(None, "", true, now)
    }

    pub fn clear_all(&mut self) {
        self.queue.clear();
        self.now_playing = None;
        self.history.clear();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn stats(&self) -> SessionStats {
        let singers: HashSet<&str> = self
            .queue
            .iter()
            .map(|entry| entry.singer.as_str())
            .chain(self.now_playing.iter().map(|np| np.entry.singer.as_str()))
            .chain(self.history.iter().map(|record| record.singer.as_str()))
            .collect();

        SessionStats {
            singers: singers.len(),
            performances: self.history.len(),
        }
    }

    fn put_on_stage(&mut self, entry: QueueEntry, now: i64) -> &NowPlaying {
        // The slot holds one act; a displaced act is logged as skipped.
        if self.now_playing.is_some() {
            self.skip(now);
        }
        debug!(id = %entry.id, singer = %entry.singer, "on stage");
        self.now_playing.insert(NowPlaying::start(entry, now))
    }

    fn close_act(
        &mut self,
        score: Option<u8>,
        comment: &str,
        skipped: bool,
        now: i64,
    ) -> Option<&HistoryRecord> {
        let np = self.now_playing.take()?;
        let record = HistoryRecord {
            duration_sec: np.elapsed_secs(now),
            id: np.entry.id,
            singer: np.entry.singer,
            song: np.entry.song,
            notes: np.entry.notes,
            key: np.entry.key,
            started_at: np.started_at,
            ended_at: now,
            score,
            comment: comment.to_string(),
            skipped,
        };
        debug!(id = %record.id, skipped, duration = record.duration_sec, "act closed");
        self.history.insert(0, record);
        self.history.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(singers: &[&str]) -> Session {
        let mut session = Session::default();
        for (idx, singer) in singers.iter().enumerate() {
            session
                .enqueue(&EntryDraft::new(*singer, "Song"), idx as i64)
                .unwrap();
        }
        session
    }

    fn singers(session: &Session) -> Vec<&str> {
        session.queue.iter().map(|e| e.singer.as_str()).collect()
    }

    #[test]
    fn test_enqueue_trims_and_appends() {
        let mut session = session_with(&["Ada"]);
        let draft = EntryDraft::new("  Bob ", " My Way\t")
            .with_notes("  for Carla ")
            .with_key(" -1 ");
        let entry = session.enqueue(&draft, 42).unwrap();

        assert_eq!(entry.singer, "Bob");
        assert_eq!(entry.song, "My Way");
        assert_eq!(entry.notes, "for Carla");
        assert_eq!(entry.key, "-1");
        assert_eq!(entry.added_at, 42);
        assert_eq!(singers(&session), vec!["Ada", "Bob"]);
        assert_ne!(session.queue[0].id, session.queue[1].id);
    }

    #[test]
    fn test_enqueue_requires_singer_and_song() {
        let mut session = Session::default();
        assert_eq!(
            session.enqueue(&EntryDraft::new("  ", "Song"), 0),
            Err(DraftError::MissingSinger)
        );
        assert_eq!(
            session.enqueue(&EntryDraft::new("Ada", ""), 0),
            Err(DraftError::MissingSong)
        );
        assert!(session.queue.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut session = session_with(&["Ada", "Bob", "Cy"]);
        let id = session.queue[1].id.clone();
        assert!(session.remove(&id));
        assert_eq!(singers(&session), vec!["Ada", "Cy"]);
        assert!(!session.remove("missing"));
    }

    #[test]
    fn test_move_at_boundaries_is_noop() {
        let mut session = session_with(&["Ada", "Bob", "Cy"]);
        let first = session.queue[0].id.clone();
        let last = session.queue[2].id.clone();

        assert!(!session.move_entry(&first, Direction::Up));
        assert!(!session.move_entry(&last, Direction::Down));
        assert!(!session.move_entry("missing", Direction::Up));
        assert_eq!(singers(&session), vec!["Ada", "Bob", "Cy"]);
    }

    #[test]
    fn test_move_swaps_neighbours() {
        let mut session = session_with(&["Ada", "Bob", "Cy"]);
        let bob = session.queue[1].id.clone();

        assert!(session.move_entry(&bob, Direction::Up));
        assert_eq!(singers(&session), vec!["Bob", "Ada", "Cy"]);
        assert!(session.move_entry(&bob, Direction::Down));
        assert!(session.move_entry(&bob, Direction::Down));
        assert_eq!(singers(&session), vec!["Ada", "Cy", "Bob"]);
    }

    #[test]
    fn test_promote_moves_entry_to_stage() {
        let mut session = session_with(&["Ada", "Bob"]);
        let bob = session.queue[1].id.clone();

        let np = session.promote(&bob, 1_000).unwrap();
        assert_eq!(np.entry.singer, "Bob");
        assert_eq!(np.started_at, 1_000);
        assert!(!np.paused);
        assert_eq!(singers(&session), vec!["Ada"]);
        assert!(session.promote("missing", 1_000).is_none());
    }

    #[test]
    fn test_promote_next_takes_head() {
        let mut session = session_with(&["Ada", "Bob"]);
        assert_eq!(session.promote_next(0).unwrap().entry.singer, "Ada");
        assert_eq!(singers(&session), vec!["Bob"]);

        let mut empty = Session::default();
        assert!(empty.promote_next(0).is_none());
        assert!(empty.now_playing.is_none());
    }

    #[test]
    fn test_promote_over_active_act_logs_it_as_skipped() {
        let mut session = session_with(&["Ada", "Bob"]);
        session.promote_next(0);
        session.promote_next(30_000);

        assert_eq!(session.now_playing.as_ref().unwrap().entry.singer, "Bob");
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.history[0].singer, "Ada");
        assert!(session.history[0].skipped);
        assert!(session.queue.is_empty());
    }

    #[test]
    fn test_start_now_bypasses_queue() {
        let mut session = session_with(&["Ada"]);
        let np = session
            .start_now(&EntryDraft::new(" Zoe ", "Hello"), 5)
            .unwrap();
        assert_eq!(np.entry.singer, "Zoe");
        assert_eq!(singers(&session), vec!["Ada"]);
    }

    #[test]
    fn test_pause_excluded_from_recorded_duration() {
        let mut session = session_with(&["Ada"]);
        session.promote_next(0);
        assert_eq!(session.toggle_pause(10_000), Some(true));
        assert_eq!(session.toggle_pause(25_000), Some(false));

        let record = session.finish("", "", 40_000).unwrap().unwrap();
        assert_eq!(record.duration_sec, 25);
        assert!(!record.skipped);
    }

    #[test]
    fn test_finish_while_paused_excludes_open_pause() {
        let mut session = session_with(&["Ada"]);
        session.promote_next(0);
        session.toggle_pause(20_000);

        let record = session.finish("", "", 50_000).unwrap().unwrap();
        assert_eq!(record.duration_sec, 20);
    }

    #[test]
    fn test_toggle_pause_without_act() {
        assert_eq!(Session::default().toggle_pause(0), None);
    }

    #[test]
    fn test_finish_rejects_bad_scores() {
        let mut session = session_with(&["Ada"]);
        session.promote_next(0);

        assert!(matches!(
            session.finish("150", "", 1_000),
            Err(ScoreError::OutOfRange(150))
        ));
        assert!(matches!(
            session.finish("abc", "", 1_000),
            Err(ScoreError::NotANumber(_))
        ));
        assert!(session.now_playing.is_some());
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_finish_records_score_and_comment() {
        let mut session = session_with(&["Ada", "Bob"]);
        session.promote_next(0);
        session.finish("85", "  great energy ", 90_500).unwrap();

        assert!(session.now_playing.is_none());
        let record = &session.history[0];
        assert_eq!(record.score, Some(85));
        assert_eq!(record.comment, "great energy");
        assert_eq!(record.duration_sec, 90);
        assert_eq!(record.ended_at, 90_500);
    }

    #[test]
    fn test_finish_with_empty_stage() {
        let mut session = Session::default();
        assert_eq!(session.finish("10", "", 0), Ok(None));
    }

    #[test]
    fn test_history_is_newest_first() {
        let mut session = session_with(&["Ada", "Bob"]);
        session.promote_next(0);
        session.finish("", "", 10_000).unwrap();
        session.promote_next(10_000);
        session.finish("", "", 20_000).unwrap();

        let order: Vec<_> = session.history.iter().map(|r| r.singer.as_str()).collect();
        assert_eq!(order, vec!["Bob", "Ada"]);
    }

    #[test]
    fn test_skip_marks_record() {
        let mut session = session_with(&["Ada"]);
        session.promote_next(0);
        let record = session.skip(3_000).unwrap();

        assert!(record.skipped);
        assert_eq!(record.score, None);
        assert!(record.comment.is_empty());
        assert!(session.now_playing.is_none());
        assert!(Session::default().skip(0).is_none());
    }

    #[test]
    fn test_clear_all_and_history() {
        let mut session = session_with(&["Ada", "Bob", "Cy"]);
        session.promote_next(0);
        session.finish("", "", 1_000).unwrap();
        session.promote_next(1_000);

        session.clear_history();
        assert!(session.history.is_empty());
        assert!(session.now_playing.is_some());
        assert_eq!(session.queue.len(), 1);

        session.clear_all();
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_stats_count_distinct_singers() {
        let mut session = session_with(&["Ada", "Bob", "Ada", "Cy"]);
        session.promote_next(0);
        session.finish("", "", 1_000).unwrap();
        session.promote_next(1_000);

        let stats = session.stats();
        assert_eq!(stats.singers, 3);
        assert_eq!(stats.performances, 1);
    }
}
