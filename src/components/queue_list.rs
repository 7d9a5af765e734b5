use crate::components::{Icon, SessionController};
use crate::session::Direction;
use dioxus::prelude::*;

const ROW_BUTTON: &str = "p-2 rounded-md bg-gray-800 hover:bg-gray-700 disabled:opacity-30";

#[component]
pub fn QueueList() -> Element {
    let session = use_context::<SessionController>();
    let entries = session.session.read().queue.clone();
    let count = entries.len();
    let empty = count == 0;
    let last = count.saturating_sub(1);

    rsx! {
        div {
            div { class: "flex items-center justify-between mb-4",
                div { class: "flex items-center gap-2",
                    Icon {
                        name: "users".to_string(),
                        class: "w-5 h-5 text-indigo-300".to_string(),
                    }
                    h2 { class: "text-lg font-semibold", "Queue" }
                    span { class: "text-xs text-gray-400", "({count})" }
                }
                button {
                    class: "inline-flex items-center gap-2 px-3 py-2 rounded-md bg-emerald-600 hover:bg-emerald-500 disabled:opacity-40 text-sm",
                    disabled: empty,
                    onclick: {
                        let session = session.clone();
                        move |_| session.promote_next()
                    },
                    Icon {
                        name: "play".to_string(),
                        class: "w-4 h-4".to_string(),
                    }
                    "Start next"
                }
            }

            if empty {
                p { class: "text-gray-400",
                    "The queue is empty. Add someone to get the night going!"
                }
            } else {
                ul { class: "divide-y divide-gray-800",
                    for (idx , entry) in entries.into_iter().enumerate() {
                        {
                            let details = entry.details();
                            let up = {
                                let session = session.clone();
                                let id = entry.id.clone();
                                move |_| session.move_entry(&id, Direction::Up)
                            };
                            let down = {
                                let session = session.clone();
                                let id = entry.id.clone();
                                move |_| session.move_entry(&id, Direction::Down)
                            };
                            let start = {
                                let session = session.clone();
                                let id = entry.id.clone();
                                move |_| session.promote(&id)
                            };
                            let remove = {
                                let session = session.clone();
                                let id = entry.id.clone();
                                move |_| session.remove(&id)
                            };
                            rsx! {
                                li { key: "{entry.id}", class: "py-3 flex items-center justify-between",
                                    div { class: "min-w-0",
                                        div { class: "font-medium truncate",
                                            "{entry.singer} — "
                                            span { class: "text-gray-300", "{entry.song}" }
                                        }
                                        if !details.is_empty() {
                                            div { class: "text-xs text-gray-400 truncate", "{details}" }
                                        }
                                    }
                                    div { class: "flex items-center gap-2 ml-4",
                                        button {
                                            class: ROW_BUTTON,
                                            aria_label: "Move up",
                                            disabled: idx == 0,
                                            onclick: up,
                                            Icon {
                                                name: "arrow-up".to_string(),
                                                class: "w-4 h-4".to_string(),
                                            }
                                        }
                                        button {
                                            class: ROW_BUTTON,
                                            aria_label: "Move down",
                                            disabled: idx == last,
                                            onclick: down,
                                            Icon {
                                                name: "arrow-down".to_string(),
                                                class: "w-4 h-4".to_string(),
                                            }
                                        }
                                        button {
                                            class: "p-2 rounded-md bg-emerald-600 hover:bg-emerald-500 text-white",
                                            aria_label: "Start",
                                            onclick: start,
                                            Icon {
                                                name: "play".to_string(),
                                                class: "w-4 h-4".to_string(),
                                            }
                                        }
                                        button {
                                            class: "p-2 rounded-md bg-red-600/90 hover:bg-red-600 text-white",
                                            aria_label: "Remove",
                                            onclick: remove,
                                            Icon {
                                                name: "trash".to_string(),
                                                class: "w-4 h-4".to_string(),
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
