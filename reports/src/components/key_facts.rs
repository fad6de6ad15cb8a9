//! Key loan facts grid with prepayment/balloon warnings.

use leptos::prelude::*;

use super::{ICON_WARNING_CIRCLE, Icon};
use crate::format::{PLACEHOLDER, direction_label, fmt_curr, fmt_percent};
use crate::types::KeyFacts;

#[component]
fn Fact(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div>
            <span class="fact-label">{label}</span>
            <span class="fact-value">{value}</span>
        </div>
    }
}

/// Loan amount, rate, APR, payment, term, product and cash to close.
#[component]
pub fn KeyFactsGrid(facts: KeyFacts) -> impl IntoView {
    let term = match facts.loan_term_years {
        Some(years) => format!("{years} years"),
        None => format!("{PLACEHOLDER} years"),
    };
    let loan_type = match (&facts.loan_product, &facts.loan_type) {
        (Some(product), Some(kind)) => format!("{product} ({kind})"),
        (Some(product), None) => product.clone(),
        (None, Some(kind)) => format!("{PLACEHOLDER} ({kind})"),
        (None, None) => PLACEHOLDER.to_string(),
    };
    let cash_to_close = match &facts.cash_to_close_direction {
        Some(dir) => format!(
            "{} ({})",
            fmt_curr(facts.cash_to_close_amount),
            direction_label(dir)
        ),
        None => fmt_curr(facts.cash_to_close_amount),
    };

    let prepayment = if facts.prepayment_penalty {
        view! {
            <div class="loan-warning">
                <Icon path=ICON_WARNING_CIRCLE size=16 />
                <strong>" Prepayment Penalty: "</strong>
                "This loan has a prepayment penalty. You may be charged a fee if you pay off or refinance early."
            </div>
        }
        .into_any()
    } else {
        view! { "" }.into_any()
    };
    let balloon = if facts.balloon_payment {
        view! {
            <div class="loan-warning">
                <Icon path=ICON_WARNING_CIRCLE size=16 />
                <strong>" Balloon Payment: "</strong>
                "This loan requires a large final payment. Make sure you understand when it's due and how you'll pay it."
            </div>
        }
        .into_any()
    } else {
        view! { "" }.into_any()
    };

    view! {
        <div class="facts-grid">
            <Fact label="Loan Amount" value=fmt_curr(facts.loan_amount) />
            <Fact label="Interest Rate" value=fmt_percent(facts.interest_rate_pct) />
            <Fact label="APR" value=fmt_percent(facts.apr) />
            <Fact label="Monthly P&I" value=fmt_curr(facts.monthly_principal_interest) />
            <Fact label="Term" value=term />
            <Fact label="Loan Type" value=loan_type />
            <Fact label="Cash to Close" value=cash_to_close />
        </div>
        {prepayment}
        {balloon}
    }
}
