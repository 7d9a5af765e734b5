use crate::components::{Icon, SessionController};
use crate::session::EntryDraft;
use dioxus::prelude::*;
use tracing::warn;

const INPUT_CLASS: &str = "w-full rounded-md bg-gray-800 border border-gray-700 px-3 py-2 text-sm outline-none focus:ring-2 ring-indigo-500";

#[component]
pub fn EntryForm() -> Element {
    let session = use_context::<SessionController>();
    let mut draft = use_signal(EntryDraft::default);
    let can_submit = draft.read().is_submittable();

    let on_submit = {
        let session = session.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let current = draft.peek().clone();
            match session.enqueue(&current) {
                Ok(()) => draft.write().clear(),
                Err(err) => warn!("entry not queued: {err}"),
            }
        }
    };

    let on_start_now = {
        let session = session.clone();
        move |_| {
            let current = draft.peek().clone();
            match session.start_now(&current) {
                Ok(()) => draft.write().clear(),
                Err(err) => warn!("entry not started: {err}"),
            }
        }
    };

    rsx! {
        form { class: "space-y-4", onsubmit: on_submit,
            div { class: "flex items-center gap-3 mb-2",
                Icon {
                    name: "mic".to_string(),
                    class: "w-5 h-5 text-indigo-300".to_string(),
                }
                h2 { class: "text-lg font-semibold", "Add a singer" }
            }
            div { class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                div {
                    label { class: "block text-xs text-gray-400 mb-1", "Singer" }
                    input {
                        class: INPUT_CLASS,
                        placeholder: "Singer name",
                        value: "{draft.read().singer}",
                        oninput: move |e: Event<FormData>| draft.write().singer = e.value(),
                    }
                }
                div {
                    label { class: "block text-xs text-gray-400 mb-1", "Song" }
                    input {
                        class: INPUT_CLASS,
                        placeholder: "Song title",
                        value: "{draft.read().song}",
                        oninput: move |e: Event<FormData>| draft.write().song = e.value(),
                    }
                }
            }
            div { class: "grid grid-cols-1 md:grid-cols-3 gap-4",
                div { class: "md:col-span-2",
                    label { class: "block text-xs text-gray-400 mb-1", "Notes" }
                    input {
                        class: INPUT_CLASS,
                        placeholder: "Dedications, version, anything the host should know",
                        value: "{draft.read().notes}",
                        oninput: move |e: Event<FormData>| draft.write().notes = e.value(),
                    }
                }
                div {
                    label { class: "block text-xs text-gray-400 mb-1", "Key" }
                    input {
                        class: INPUT_CLASS,
                        placeholder: "e.g. -1, +2, original",
                        value: "{draft.read().key}",
                        oninput: move |e: Event<FormData>| draft.write().key = e.value(),
                    }
                }
            }
            div { class: "flex items-center gap-3",
                button {
                    r#type: "submit",
                    disabled: !can_submit,
                    class: "px-4 py-2 rounded-md bg-indigo-600 hover:bg-indigo-500 disabled:opacity-40 disabled:cursor-not-allowed text-sm font-medium",
                    "Add to queue"
                }
                button {
                    r#type: "button",
                    disabled: !can_submit,
                    class: "inline-flex items-center gap-2 px-4 py-2 rounded-md bg-emerald-600 hover:bg-emerald-500 disabled:opacity-40 disabled:cursor-not-allowed text-sm font-medium",
                    onclick: on_start_now,
                    Icon {
                        name: "play".to_string(),
                        class: "w-4 h-4".to_string(),
                    }
                    "Start now"
                }
            }
        }
    }
}
