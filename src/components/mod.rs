//! The components module contains all shared components for our app.

mod app;
mod confirm_dialog;
mod entry_form;
mod header;
mod history_list;
mod icons;
mod queue_list;
mod session_controller;
mod stage_panel;
mod stage_ticker;

pub use app::*;
pub use confirm_dialog::*;
pub use entry_form::*;
pub use header::*;
pub use history_list::*;
pub use icons::*;
pub use queue_list::*;
pub use session_controller::*;
pub use stage_panel::*;
pub use stage_ticker::*;

#[cfg(test)]
pub(crate) mod test_support {
    use dioxus::prelude::*;

    fn host() -> Element {
        rsx! {}
    }

    /// Runs `body` inside the root scope of a headless `VirtualDom`, so signals
    /// and spawned tasks have a runtime to live in.
    pub fn in_root_scope(body: impl FnOnce()) {
        let mut dom = VirtualDom::new(host);
        dom.rebuild_in_place();
        dom.in_scope(ScopeId::ROOT, body);
    }
}
