use crate::components::{ConfirmAction, ConfirmController, Icon, SessionController};
use dioxus::prelude::*;

#[component]
pub fn Header() -> Element {
    let session = use_context::<SessionController>();
    let confirm = use_context::<ConfirmController>();
    let stats = session.session.read().stats();

    rsx! {
        header { class: "border-b border-gray-800 bg-gray-950/70 backdrop-blur",
            div { class: "max-w-6xl mx-auto px-4 py-4 flex items-center justify-between",
                div { class: "flex items-center gap-3",
                    div { class: "bg-indigo-600/20 text-indigo-300 p-2 rounded-lg",
                        Icon {
                            name: "music".to_string(),
                            class: "w-5 h-5".to_string(),
                        }
                    }
                    div {
                        h1 { class: "text-xl font-semibold", "Karaoke Night" }
                        p { class: "text-xs text-gray-400", "Queue, stage and scores" }
                    }
                }
                div { class: "flex items-center gap-4",
                    div { class: "hidden sm:flex items-center gap-3 text-xs text-gray-400",
                        span {
                            "Singers: "
                            span { class: "text-gray-200", "{stats.singers}" }
                        }
                        span {
                            "Performances: "
                            span { class: "text-gray-200", "{stats.performances}" }
                        }
                    }
                    button {
                        class: "inline-flex items-center gap-2 px-3 py-2 rounded-md bg-gray-800 hover:bg-gray-700 text-gray-100 text-sm border border-gray-700",
                        onclick: move |_| confirm.ask(ConfirmAction::ClearAll),
                        Icon {
                            name: "rotate".to_string(),
                            class: "w-4 h-4".to_string(),
                        }
                        "Reset"
                    }
                }
            }
        }
    }
}
