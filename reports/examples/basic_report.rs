//! Basic analysis report example.
//!
//! Run with: `cargo run --example basic_report`

use disclosure_report::render_analysis_report;
use disclosure_report::types::{
    AnalysisView, Computed, KeyFacts, Observed, Report, ReportItem, Status,
};

fn main() {
    let analysis = AnalysisView {
        facts: KeyFacts {
            loan_amount: Some(320_000.0),
            interest_rate_pct: Some(6.25),
            apr: Some(6.41),
            monthly_principal_interest: Some(1970.30),
            loan_term_years: Some(30.0),
            loan_product: Some("Fixed Rate".into()),
            loan_type: Some("Conventional".into()),
            cash_to_close_amount: Some(18_450.0),
            cash_to_close_direction: Some("from_borrower".into()),
            ..Default::default()
        },
        confidence_notes: vec!["All pages extracted".into()],
        report: Report {
            verdict: Status::Warn,
            items: vec![ReportItem {
                section: "A".into(),
                label: "Origination Charges".into(),
                observed: Some(Observed::Text("$2,400.00 (75 bps)".into())),
                expected: Some("18-40 bps (median: 29 bps)".into()),
                status: Status::Warn,
                note: Some("+159% above median".into()),
                computed: Some(Computed {
                    loan_amount: Some(320_000.0),
                }),
                ..Default::default()
            }],
        },
        summary: Some("Lender fees run above the typical range.".into()),
    };

    let html = render_analysis_report(&analysis, "sample-cd.pdf");

    let output_path = "basic_report.html";
    std::fs::write(output_path, &html).expect("Failed to write report");

    println!("Report written to: {}", output_path);
    println!("HTML size: {} bytes", html.len());
}
