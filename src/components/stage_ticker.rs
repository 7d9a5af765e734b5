use crate::config::TICK_INTERVAL_MS;
use dioxus::core::Task;
use dioxus::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
async fn tick_delay_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

#[cfg(target_arch = "wasm32")]
async fn tick_delay_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;
}

/// Handle to a periodic callback running on the Dioxus runtime.
#[derive(Clone, Copy)]
pub struct Ticker {
    task: Task,
}

impl Ticker {
    pub fn start(interval_ms: u64, mut on_tick: impl FnMut() + 'static) -> Self {
        let task = spawn(async move {
            loop {
                tick_delay_ms(interval_ms).await;
                on_tick();
            }
        });
        Self { task }
    }

    pub fn cancel(self) {
        self.task.cancel();
    }
}

/// Wall-clock milliseconds, refreshed once per tick while the calling component is mounted.
pub fn use_stage_clock() -> Signal<i64> {
    let mut now = use_signal(crate::session::now_millis);
    let ticker = use_hook(move || {
        Ticker::start(TICK_INTERVAL_MS, move || {
            now.set(crate::session::now_millis())
        })
    });
    use_drop(move || ticker.cancel());
    now
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::in_root_scope;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_cancel_drops_the_tick_callback() {
        in_root_scope(|| {
            let ticks = Rc::new(Cell::new(0));
            let counter = ticks.clone();
            let ticker = Ticker::start(TICK_INTERVAL_MS, move || counter.set(counter.get() + 1));
            assert_eq!(Rc::strong_count(&ticks), 2);

            ticker.cancel();
            assert_eq!(Rc::strong_count(&ticks), 1);
            assert_eq!(ticks.get(), 0);
        });
    }
}
