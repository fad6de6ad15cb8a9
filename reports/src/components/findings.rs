//! Detailed findings table.

use leptos::prelude::*;

use super::{ICON_SQUARES_FOUR, Icon, ItemBadge};
use crate::format::{
    Tone, assess, friendly_label, observed_display, parse_bps_and_amount, percent_of_loan,
};
use crate::types::ReportItem;

fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Green => "tone-green",
        Tone::Amber => "tone-amber",
        Tone::Red => "tone-red",
        Tone::Grey => "tone-grey",
        Tone::Blue => "tone-blue",
    }
}

/// Table of benchmarked line items.
#[component]
pub fn FindingsTable(items: Vec<ReportItem>) -> impl IntoView {
    let body = if items.is_empty() {
        view! { <p class="no-findings">"No findings."</p> }.into_any()
    } else {
        view! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Fee Category"</th>
                        <th>"You're Paying"</th>
                        <th>"Assessment"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {items
                        .into_iter()
                        .map(|item| view! { <FindingRow item=item /> })
                        .collect::<Vec<_>>()}
                </tbody>
            </table>
        }
        .into_any()
    };

    view! {
        <div class="panel">
            <h3>
                <Icon path=ICON_SQUARES_FOUR small=true />
                " Detailed Findings"
            </h3>
            {body}
        </div>
    }
}

#[component]
fn FindingRow(item: ReportItem) -> impl IntoView {
    let label = friendly_label(&item.section, &item.label);
    let paying = observed_display(&item);
    let share = parse_bps_and_amount(item.observed.as_ref())
        .bps
        .filter(|bps| *bps != 0.0)
        .map(percent_of_loan);
    let assessment = assess(&item);
    let headline_class = tone_class(assessment.tone());

    let share_view = match share {
        Some(text) => view! { <div class="sub">{text}</div> }.into_any(),
        None => view! { "" }.into_any(),
    };
    let detail_view = match assessment.detail() {
        Some(text) => view! { <div class="range-chip">{text}</div> }.into_any(),
        None => view! { "" }.into_any(),
    };
    let overpay_view = match assessment.overpay() {
        Some(text) => view! { <div class="overpay">{text}</div> }.into_any(),
        None => view! { "" }.into_any(),
    };

    view! {
        <tr>
            <td>
                <strong>{label}</strong>
                <div class="section-code">{item.section.clone()}</div>
            </td>
            <td>
                <strong>{paying}</strong>
                {share_view}
            </td>
            <td>
                <div class=headline_class>{assessment.headline()}</div>
                {detail_view}
                {overpay_view}
            </td>
            <td>
                <ItemBadge item=item />
            </td>
        </tr>
    }
}
