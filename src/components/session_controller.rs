//! Owns the session signal and the store it is mirrored to.

use crate::db::{save_session, KeyValueStore};
use crate::session::{now_millis, Direction, DraftError, EntryDraft, ScoreError, Session};
use dioxus::prelude::*;
use std::rc::Rc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct SessionController {
    pub session: Signal<Session>,
    store: Rc<dyn KeyValueStore>,
}

impl SessionController {
    pub fn new(session: Signal<Session>, store: Rc<dyn KeyValueStore>) -> Self {
        Self { session, store }
    }

    /// Applies `apply` to the session and mirrors the result to storage.
    fn update<R>(&self, action: &'static str, apply: impl FnOnce(&mut Session, i64) -> R) -> R {
        let mut session = self.session.clone();
        let result = {
            let mut guard = session.write();
            apply(&mut *guard, now_millis())
        };
        if let Err(err) = save_session(self.store.as_ref(), &session.peek()) {
            warn!(action, "failed to persist session: {err}");
        }
        result
    }

    pub fn enqueue(&self, draft: &EntryDraft) -> Result<(), DraftError> {
        self.update("enqueue", |s, now| s.enqueue(draft, now).map(|_| ()))
    }

    pub fn start_now(&self, draft: &EntryDraft) -> Result<(), DraftError> {
        self.update("start_now", |s, now| s.start_now(draft, now).map(|_| ()))
    }

    pub fn remove(&self, id: &str) {
        self.update("remove", |s, _| s.remove(id));
    }

    pub fn move_entry(&self, id: &str, direction: Direction) {
        self.update("move", |s, _| s.move_entry(id, direction));
    }

    pub fn promote(&self, id: &str) {
        self.update("promote", |s, now| {
            s.promote(id, now);
        });
    }

    pub fn promote_next(&self) {
        self.update("promote_next", |s, now| {
            s.promote_next(now);
        });
    }

    pub fn toggle_pause(&self) {
        self.update("toggle_pause", |s, now| s.toggle_pause(now));
    }

    pub fn finish(&self, score: &str, comment: &str) -> Result<(), ScoreError> {
        self.update("finish", |s, now| s.finish(score, comment, now).map(|_| ()))
    }

    pub fn skip(&self) {
        self.update("skip", |s, now| {
            s.skip(now);
        });
    }

    pub fn clear_all(&self) {
        info!("clearing queue, stage and history");
        self.update("clear_all", |s, _| s.clear_all());
    }

    pub fn clear_history(&self) {
        info!("clearing history");
        self.update("clear_history", |s, _| s.clear_history());
    }
}
