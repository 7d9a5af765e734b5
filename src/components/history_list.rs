use crate::components::{ConfirmAction, ConfirmController, SessionController};
use crate::session::{format_clock_time, format_duration, HistoryRecord};
use dioxus::prelude::*;

fn outcome_line(record: &HistoryRecord) -> String {
    let mut line = if record.skipped {
        "Skipped".to_string()
    } else {
        format!("Duration: {}", format_duration(record.duration_sec))
    };
    if let Some(score) = record.score {
        line.push_str(&format!(" • Score: {score}"));
    }
    line
}

#[component]
pub fn HistoryList() -> Element {
    let session = use_context::<SessionController>();
    let confirm = use_context::<ConfirmController>();
    let records = session.session.read().history.clone();

    rsx! {
        section { class: "bg-gray-900/60 border border-gray-800 rounded-xl p-5",
            div { class: "flex items-center justify-between mb-4",
                h2 { class: "text-lg font-semibold", "Performance history" }
                if !records.is_empty() {
                    button {
                        class: "text-sm text-gray-400 hover:text-gray-200",
                        onclick: move |_| confirm.ask(ConfirmAction::ClearHistory),
                        "Clear history"
                    }
                }
            }
            if records.is_empty() {
                p { class: "text-gray-400", "No finished performances yet." }
            } else {
                ul { class: "divide-y divide-gray-800",
                    for record in records {
                        li {
                            key: "{record.ended_at}-{record.id}",
                            class: "py-3 flex items-start justify-between",
                            div {
                                div { class: "font-medium",
                                    "{record.singer} — "
                                    span { class: "text-gray-300", "{record.song}" }
                                }
                                div { class: "text-xs text-gray-400 mt-1", "{outcome_line(&record)}" }
                                if !record.comment.is_empty() {
                                    div { class: "text-xs text-gray-400 mt-1", "Note: {record.comment}" }
                                }
                            }
                            div { class: "text-xs text-gray-500 ml-4 mt-1 font-mono",
                                "{format_clock_time(record.ended_at)}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(skipped: bool, score: Option<u8>) -> HistoryRecord {
        HistoryRecord {
            id: "h".to_string(),
            singer: "Ada".to_string(),
            song: "Volare".to_string(),
            notes: String::new(),
            key: String::new(),
            started_at: 0,
            ended_at: 125_000,
            duration_sec: 125,
            score,
            comment: String::new(),
            skipped,
        }
    }

    #[test]
    fn test_outcome_line() {
        assert_eq!(outcome_line(&record(false, None)), "Duration: 2:05");
        assert_eq!(outcome_line(&record(false, Some(85))), "Duration: 2:05 • Score: 85");
        assert_eq!(outcome_line(&record(true, None)), "Skipped");
    }
}
