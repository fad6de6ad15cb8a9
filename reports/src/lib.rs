//! # disclosure-report
//!
//! Canonical findings schema, presentation helpers, and a Leptos SSR
//! renderer for Closing Disclosure review results.
//!
//! The client crate normalizes backend responses into [`types`]; this crate
//! turns them into text fragments ([`format`]) and complete static HTML
//! pages ([`render_upload_report`], [`render_analysis_report`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use disclosure_report::render_upload_report;
//! use disclosure_report::types::{FileRecord, SummaryPoint};
//!
//! let files = vec![FileRecord {
//!     file_name: "closing.pdf".into(),
//!     title: Some("Closing Disclosure".into()),
//!     points: vec![SummaryPoint {
//!         title: "Lender fees".into(),
//!         summary: "Origination is above typical".into(),
//!         ..Default::default()
//!     }],
//! }];
//!
//! let html = render_upload_report(&files, "batch.zip");
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - canonical, versioned schema
//! - [`format`] - pure presentation mapping (currency, badges, bps)
//! - [`components`] - Leptos UI components
//! - [`styles`] - CSS constants
//!
//! Rendering uses Leptos 0.8's `RenderHtml` trait; no reactive runtime or
//! hydration is involved.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod components;
pub mod format;
pub mod styles;
pub mod types;

use components::{ErrorBanner, FileCards, FindingsTable, ReportDocument, SummaryPanel, VerdictPanel};
use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;
use types::{AnalysisView, FileRecord, SCHEMA_VERSION};

fn with_doctype(html: String) -> String {
    // Leptos doesn't include DOCTYPE, so we add it
    format!("<!DOCTYPE html>\n{}", html)
}

fn meta_line(source: &str) -> String {
    format!("{source} • schema v{SCHEMA_VERSION}")
}

/// Render the card view for an upload batch.
///
/// # Example
///
/// ```rust
/// use disclosure_report::render_upload_report;
///
/// let html = render_upload_report(&[], "empty.zip");
/// assert!(html.contains("0 files uploaded"));
/// ```
pub fn render_upload_report(files: &[FileRecord], source: &str) -> String {
    let files = files.to_vec();
    let doc = view! {
        <ReportDocument title="Document Summaries".to_string() meta=meta_line(source)>
            <FileCards files=files />
        </ReportDocument>
    };
    with_doctype(doc.to_html())
}

/// Render verdict, key facts, summary and findings for one analyzed
/// disclosure.
pub fn render_analysis_report(analysis: &AnalysisView, source: &str) -> String {
    let AnalysisView {
        facts,
        confidence_notes,
        report,
        summary,
    } = analysis.clone();
    let doc = view! {
        <ReportDocument title="Closing Disclosure Analysis".to_string() meta=meta_line(source)>
            <div class="overview-grid">
                <VerdictPanel verdict=report.verdict facts=facts />
                <SummaryPanel notes=confidence_notes summary=summary />
            </div>
            <FindingsTable items=report.items />
        </ReportDocument>
    };
    with_doctype(doc.to_html())
}

/// Render the error state of a flow.
pub fn render_error_report(title: &str, message: &str) -> String {
    let message = message.to_string();
    let doc = view! {
        <ReportDocument title=title.to_string()>
            <ErrorBanner message=message />
        </ReportDocument>
    };
    with_doctype(doc.to_html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use types::{Computed, KeyFacts, Observed, Report, ReportItem, Status, SummaryPoint};

    fn point(summary: &str, red: bool) -> SummaryPoint {
        SummaryPoint {
            title: format!("{summary} title"),
            summary: summary.into(),
            details: format!("{summary} details"),
            is_red_flag: red,
        }
    }

    #[test]
    fn renders_one_card_per_file_even_with_duplicate_names() {
        let files = vec![
            FileRecord {
                file_name: "cd.pdf".into(),
                title: Some("First".into()),
                points: vec![point("Fees look fine", false)],
            },
            FileRecord {
                file_name: "cd.pdf".into(),
                title: None,
                points: vec![],
            },
        ];
        let html = render_upload_report(&files, "batch.zip");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("2 files uploaded"));
        assert_eq!(html.matches("class=\"file-card\"").count(), 2);
        assert!(html.contains("id=\"file-0\""));
        assert!(html.contains("id=\"file-1\""));
        assert!(html.contains("First"));
        assert!(html.contains("No summary available"));
        assert!(html.contains("batch.zip"));
    }

    #[test]
    fn red_flags_are_marked() {
        let files = vec![FileRecord {
            file_name: "a.pdf".into(),
            title: None,
            points: vec![point("Balloon payment due", true), point("Rate fixed", false)],
        }];
        let html = render_upload_report(&files, "a.pdf");

        assert!(html.contains("1 red flag"));
        assert!(html.contains("point red-flag"));
        assert!(html.contains("Balloon payment due details"));
        assert!(html.contains("<details"));
    }

    #[test]
    fn renders_analysis_sections() {
        let analysis = AnalysisView {
            facts: KeyFacts {
                loan_amount: Some(300_000.0),
                interest_rate_pct: Some(6.5),
                prepayment_penalty: true,
                ..Default::default()
            },
            confidence_notes: vec!["Page 2 was blurry".into()],
            report: Report {
                verdict: Status::Warn,
                items: vec![
                    ReportItem {
                        section: "A".into(),
                        label: "Origination Charges".into(),
                        observed: Some(Observed::Text("$3,000.00 (100 bps)".into())),
                        expected: Some("18-40 bps (median: 29 bps)".into()),
                        status: Status::Fail,
                        note: Some("+245% above median".into()),
                        computed: Some(Computed {
                            loan_amount: Some(300_000.0),
                        }),
                        ..Default::default()
                    },
                    ReportItem {
                        section: "F".into(),
                        label: "Prepaids".into(),
                        status: Status::Pass,
                        ..Default::default()
                    },
                ],
            },
            summary: Some("Lender fees are high.".into()),
        };
        let html = render_analysis_report(&analysis, "cd.pdf");

        assert!(html.contains("Check Details"));
        assert!(html.contains("$300,000.00"));
        assert!(html.contains("6.5%"));
        assert!(html.contains("Prepayment Penalty"));
        assert!(!html.contains("Balloon Payment"));
        assert!(html.contains("Page 2 was blurry"));
        assert!(html.contains("Lender fees are high."));
        assert!(html.contains("Lender Fees: Lender Fees &amp; Points"));
        assert!(html.contains("Needs Action"));
        assert!(html.contains("1.00% of loan"));
        assert!(html.contains("Fair range: $540 - $1,200"));
        assert!(html.contains("INFO"));
    }

    #[test]
    fn empty_analysis_shows_placeholders() {
        let html = render_analysis_report(&AnalysisView::default(), "x.pdf");
        assert!(html.contains("No findings."));
        assert!(html.contains("No notes available."));
        assert!(html.contains("—"));
    }

    #[test]
    fn error_report_carries_message() {
        let html = render_error_report("Upload", "File size must be less than 200MB");
        assert!(html.contains("error-banner"));
        assert!(html.contains("File size must be less than 200MB"));
    }
}
