//! Status badge pill.

use leptos::prelude::*;

use crate::format::{Badge, item_badge, status_badge};
use crate::types::{ReportItem, Status};

/// Pill for a verdict or item status.
#[component]
pub fn StatusBadge(status: Status) -> impl IntoView {
    view! { <BadgePill badge=status_badge(&status) /> }
}

/// Pill for a findings row (informational sections read `INFO`).
#[component]
pub fn ItemBadge(item: ReportItem) -> impl IntoView {
    view! { <BadgePill badge=item_badge(&item) /> }
}

#[component]
fn BadgePill(badge: Badge) -> impl IntoView {
    view! { <span class=badge.tone.css_class()>{badge.label}</span> }
}
