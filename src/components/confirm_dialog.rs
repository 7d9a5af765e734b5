use crate::components::SessionController;
use dioxus::prelude::*;

/// Destructive actions that need an explicit "yes" first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ClearAll,
    ClearHistory,
}

impl ConfirmAction {
    pub fn prompt(self) -> &'static str {
        match self {
            ConfirmAction::ClearAll => "Reset the queue, the stage and the whole history?",
            ConfirmAction::ClearHistory => "Delete the performance history?",
        }
    }

    pub fn confirm_label(self) -> &'static str {
        match self {
            ConfirmAction::ClearAll => "Reset everything",
            ConfirmAction::ClearHistory => "Clear history",
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
pub struct ConfirmController {
    pub pending: Signal<Option<ConfirmAction>>,
}

impl ConfirmController {
    pub fn new(pending: Signal<Option<ConfirmAction>>) -> Self {
        Self { pending }
    }

    pub fn ask(&self, action: ConfirmAction) {
        let mut pending = self.pending;
        pending.set(Some(action));
    }

    pub fn dismiss(&self) {
        let mut pending = self.pending;
        pending.set(None);
    }
}

#[component]
pub fn ConfirmDialog(controller: ConfirmController) -> Element {
    let session = use_context::<SessionController>();
    let Some(action) = (controller.pending)() else {
        return rsx! {};
    };

    let on_confirm = move |_| {
        match action {
            ConfirmAction::ClearAll => session.clear_all(),
            ConfirmAction::ClearHistory => session.clear_history(),
        }
        controller.dismiss();
    };

    rsx! {
        div {
            class: "fixed inset-0 z-50 flex items-center justify-center bg-black/60 backdrop-blur-sm",
            onclick: move |_| controller.dismiss(),
            div {
                class: "w-full max-w-sm rounded-xl border border-gray-800 bg-gray-900 p-5 shadow-xl",
                role: "alertdialog",
                onclick: move |evt| evt.stop_propagation(),
                p { class: "text-sm text-gray-200", "{action.prompt()}" }
                div { class: "mt-5 flex justify-end gap-3",
                    button {
                        class: "px-3 py-2 rounded-md bg-gray-800 hover:bg-gray-700 text-sm",
                        onclick: move |_| controller.dismiss(),
                        "Cancel"
                    }
                    button {
                        class: "px-3 py-2 rounded-md bg-red-600 hover:bg-red-500 text-sm text-white",
                        onclick: on_confirm,
                        "{action.confirm_label()}"
                    }
                }
            }
        }
    }
}
