//! File cards for an upload batch.
//!
//! Each card shows the title and the one-line summaries. The per-point
//! details sit in a native `<details>` block, which is the static-page form
//! of the expand/collapse interaction.

use leptos::prelude::*;

use super::{ICON_CARET_DOWN, ICON_FOLDER, ICON_WARNING_CIRCLE, Icon};
use crate::types::{FileRecord, SummaryPoint};

/// Grid of cards, one per uploaded file. Duplicate file names are fine:
/// cards are keyed by position.
#[component]
pub fn FileCards(files: Vec<FileRecord>) -> impl IntoView {
    let heading = match files.len() {
        1 => "1 file uploaded".to_string(),
        n => format!("{n} files uploaded"),
    };

    view! {
        <div class="panel">
            <h2>
                <Icon path=ICON_FOLDER small=true />
                " " {heading}
            </h2>
            <div class="card-grid">
                {files
                    .into_iter()
                    .enumerate()
                    .map(|(idx, file)| view! { <FileCard file=file index=idx /> })
                    .collect::<Vec<_>>()}
            </div>
        </div>
    }
}

/// A single file card.
#[component]
pub fn FileCard(file: FileRecord, index: usize) -> impl IntoView {
    let card_id = format!("file-{index}");
    let title = file.display_title().to_string();
    let flags = file.red_flag_count();

    let bullets = if file.points.is_empty() {
        view! { <p class="muted">"No summary available"</p> }.into_any()
    } else {
        view! {
            <ul>
                {file
                    .points
                    .iter()
                    .map(|p| {
                        let class = if p.is_red_flag { "red-flag" } else { "" };
                        view! { <li class=class>{p.summary.clone()}</li> }
                    })
                    .collect::<Vec<_>>()}
            </ul>
        }
        .into_any()
    };

    let flag_marker = if flags > 0 {
        view! {
            <span class="flag-marker">
                <Icon path=ICON_WARNING_CIRCLE size=14 />
                {format!(" {flags} red flag{}", if flags == 1 { "" } else { "s" })}
            </span>
        }
        .into_any()
    } else {
        view! { "" }.into_any()
    };

    let details = if file.points.is_empty() {
        view! { "" }.into_any()
    } else {
        view! {
            <details class="point-details">
                <summary>
                    <Icon path=ICON_CARET_DOWN small=true />
                    " Details"
                </summary>
                {file
                    .points
                    .into_iter()
                    .map(|point| view! { <PointDetail point=point /> })
                    .collect::<Vec<_>>()}
            </details>
        }
        .into_any()
    };

    view! {
        <article class="file-card" id=card_id>
            <h3>{title} {flag_marker}</h3>
            <div class="file-name">{file.file_name}</div>
            {bullets}
            {details}
        </article>
    }
}

#[component]
fn PointDetail(point: SummaryPoint) -> impl IntoView {
    let class = if point.is_red_flag { "point red-flag" } else { "point" };
    let body = if point.details.trim().is_empty() {
        view! { "" }.into_any()
    } else {
        view! { <div class="point-body">{point.details}</div> }.into_any()
    };

    view! {
        <div class=class>
            <div class="point-title">{point.title}</div>
            <div class="point-body">{point.summary}</div>
            {body}
        </div>
    }
}
