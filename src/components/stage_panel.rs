use crate::components::{use_stage_clock, Icon, SessionController};
use crate::session::format_duration;
use dioxus::prelude::*;

const FIELD_CLASS: &str = "rounded-md bg-gray-800 border border-gray-700 px-3 py-2 text-sm outline-none focus:ring-2 ring-amber-500";

#[component]
pub fn StagePanel() -> Element {
    let session = use_context::<SessionController>();
    let now = use_stage_clock();
    let mut score = use_signal(String::new);
    let mut comment = use_signal(String::new);
    let mut score_error = use_signal(|| None::<String>);

    // Score and comment belong to one act; reset them when the act changes.
    let stage_id = use_memo({
        let session = session.clone();
        move || {
            session
                .session
                .read()
                .now_playing
                .as_ref()
                .map(|np| np.id().to_string())
        }
    });
    use_effect(move || {
        let _ = stage_id();
        score.set(String::new());
        comment.set(String::new());
        score_error.set(None);
    });

    let now_playing = session.session.read().now_playing.clone();
    let elapsed = now_playing
        .as_ref()
        .map(|np| np.elapsed_secs(now()))
        .unwrap_or(0);

    let on_finish = {
        let session = session.clone();
        move |_| {
            let score_input = score.peek().clone();
            let comment_input = comment.peek().clone();
            if let Err(err) = session.finish(&score_input, &comment_input) {
                score_error.set(Some(err.to_string()));
            }
        }
    };

    rsx! {
        div { class: "bg-gray-900/60 border border-gray-800 rounded-xl p-5 sticky top-4",
            div { class: "flex items-center justify-between mb-4",
                h2 { class: "text-lg font-semibold", "Stage" }
                div { class: "text-xs text-gray-400 inline-flex items-center gap-1 font-mono",
                    Icon {
                        name: "clock".to_string(),
                        class: "w-3.5 h-3.5".to_string(),
                    }
                    "{format_duration(elapsed)}"
                }
            }

            match now_playing {
                None => rsx! {
                    div { class: "text-gray-400",
                        "Nobody on stage right now."
                        div { class: "mt-3",
                            button {
                                class: "inline-flex items-center gap-2 px-3 py-2 rounded-md bg-emerald-600 hover:bg-emerald-500 text-sm text-white",
                                onclick: {
                                    let session = session.clone();
                                    move |_| session.promote_next()
                                },
                                Icon {
                                    name: "play".to_string(),
                                    class: "w-4 h-4".to_string(),
                                }
                                "Start next from queue"
                            }
                        }
                    }
                },
                Some(np) => rsx! {
                    div { class: "space-y-4",
                        div {
                            div { class: "text-xl font-semibold", "{np.entry.singer}" }
                            div { class: "text-gray-300", "{np.entry.song}" }
                            if !np.entry.details().is_empty() {
                                div { class: "text-xs text-gray-400 mt-1", "{np.entry.details()}" }
                            }
                            if np.paused {
                                div { class: "text-xs text-amber-300 mt-1 uppercase tracking-wider",
                                    "Paused"
                                }
                            }
                        }

                        div { class: "flex items-center gap-2",
                            button {
                                class: "inline-flex items-center gap-2 px-3 py-2 rounded-md bg-gray-800 hover:bg-gray-700 text-sm",
                                onclick: {
                                    let session = session.clone();
                                    move |_| session.toggle_pause()
                                },
                                Icon {
                                    name: if np.paused { "play".to_string() } else { "pause".to_string() },
                                    class: "w-4 h-4".to_string(),
                                }
                                if np.paused {
                                    "Resume"
                                } else {
                                    "Pause"
                                }
                            }
                            button {
                                class: "inline-flex items-center gap-2 px-3 py-2 rounded-md bg-amber-600 hover:bg-amber-500 text-sm text-white",
                                onclick: {
                                    let session = session.clone();
                                    move |_| session.skip()
                                },
                                Icon {
                                    name: "skip".to_string(),
                                    class: "w-4 h-4".to_string(),
                                }
                                "Skip"
                            }
                        }

                        div { class: "pt-2 border-t border-gray-800",
                            div { class: "flex items-end gap-3",
                                div { class: "flex-1",
                                    label { class: "block text-xs text-gray-400 mb-1", "Score (0-100)" }
                                    div { class: "flex items-center gap-2",
                                        div { class: "p-2 rounded-md bg-gray-800 text-amber-300",
                                            Icon {
                                                name: "star".to_string(),
                                                class: "w-4 h-4".to_string(),
                                            }
                                        }
                                        input {
                                            class: "w-24 {FIELD_CLASS}",
                                            inputmode: "numeric",
                                            placeholder: "e.g. 85",
                                            value: "{score}",
                                            oninput: move |e: Event<FormData>| {
                                                score.set(e.value());
                                                score_error.set(None);
                                            },
                                        }
                                    }
                                }
                                div { class: "flex-[2]",
                                    label { class: "block text-xs text-gray-400 mb-1", "Comment" }
                                    input {
                                        class: "w-full {FIELD_CLASS}",
                                        placeholder: "Great performance, huge energy!",
                                        value: "{comment}",
                                        oninput: move |e: Event<FormData>| comment.set(e.value()),
                                    }
                                }
                            }
                            if let Some(message) = score_error() {
                                p { class: "mt-2 text-xs text-red-400", "{message}" }
                            }
                            div { class: "mt-4 flex items-center gap-3",
                                button {
                                    class: "inline-flex items-center gap-2 px-3 py-2 rounded-md bg-emerald-600 hover:bg-emerald-500 text-sm text-white",
                                    onclick: on_finish,
                                    Icon {
                                        name: "stop".to_string(),
                                        class: "w-4 h-4".to_string(),
                                    }
                                    "Finish performance"
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
