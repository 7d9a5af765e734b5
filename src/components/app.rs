use crate::components::{
    ConfirmAction, ConfirmController, ConfirmDialog, EntryForm, Header, HistoryList, QueueList,
    SessionController, StagePanel,
};
use crate::db::{default_store, load_session, KeyValueStore};
use dioxus::prelude::*;
use std::rc::Rc;

#[component]
pub fn AppShell() -> Element {
    // Storage is opened and read once per mount.
    let store = use_hook(|| -> Rc<dyn KeyValueStore> { default_store() });
    let session = use_signal({
        let store = store.clone();
        move || load_session(store.as_ref())
    });
    let pending_confirm = use_signal(|| None::<ConfirmAction>);

    let controller = SessionController::new(session, store);
    let confirm = ConfirmController::new(pending_confirm);

    use_context_provider(|| controller.clone());
    use_context_provider(|| confirm);

    rsx! {
        div { class: "min-h-screen bg-gray-950 text-gray-100",
            Header {}
            main { class: "max-w-6xl mx-auto px-4 py-6 space-y-6",
                section { class: "grid grid-cols-1 lg:grid-cols-3 gap-6",
                    div { class: "lg:col-span-2 space-y-6",
                        div { class: "bg-gray-900/60 border border-gray-800 rounded-xl p-5",
                            EntryForm {}
                        }
                        div { class: "bg-gray-900/60 border border-gray-800 rounded-xl p-5",
                            QueueList {}
                        }
                    }
                    div { class: "lg:col-span-1", StagePanel {} }
                }
                HistoryList {}
            }
        }

        ConfirmDialog { controller: confirm }
    }
}
