//! Verdict and summary panels shown above the findings table.

use leptos::prelude::*;

use super::{ICON_ROBOT, Icon, KeyFactsGrid, StatusBadge};
use crate::types::{KeyFacts, Status};

/// Overall verdict badge with the key facts underneath.
#[component]
pub fn VerdictPanel(verdict: Status, facts: KeyFacts) -> impl IntoView {
    view! {
        <div class="panel">
            <h3>"Verdict"</h3>
            <StatusBadge status=verdict />
            <KeyFactsGrid facts=facts />
        </div>
    }
}

/// Extraction confidence notes plus the plain-language summary.
#[component]
pub fn SummaryPanel(notes: Vec<String>, summary: Option<String>) -> impl IntoView {
    let summary = summary.filter(|s| !s.trim().is_empty());

    let content = if notes.is_empty() && summary.is_none() {
        view! { <p class="muted">"No notes available."</p> }.into_any()
    } else {
        let notes_view = if notes.is_empty() {
            view! { "" }.into_any()
        } else {
            view! {
                <ul>
                    {notes.into_iter().map(|n| view! { <li>{n}</li> }).collect::<Vec<_>>()}
                </ul>
            }
            .into_any()
        };
        let summary_view = match summary {
            Some(text) => view! { <p class="summary-text">{text}</p> }.into_any(),
            None => view! { "" }.into_any(),
        };
        view! {
            {notes_view}
            {summary_view}
        }
        .into_any()
    };

    view! {
        <div class="panel">
            <h3>
                <Icon path=ICON_ROBOT small=true />
                " Summary"
            </h3>
            {content}
        </div>
    }
}
