//! Result rendering for the terminal, JSON, and HTML surfaces.
//!
//! Terminal text is produced as `String` so it can be tested without a
//! terminal; the CLI prints it.

use std::fmt::Write as _;
use std::path::Path;

use disclosure_report::format::{
    assess, fmt_curr, fmt_percent, friendly_label, item_badge, observed_display, status_badge,
};
use disclosure_report::types::{AnalysisView, FileRecord, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};

use crate::colors::Painter;
use crate::error::FlowError;
use crate::normalize::UploadResult;
use crate::progress::format_count;
use crate::session::Expansion;

// ============================================================================
// JSON envelopes
// ============================================================================

/// JSON shape of an upload outcome. Also a valid upload wire response, so
/// saved output can be fed back to `render`.
#[derive(Debug, Serialize)]
pub struct UploadEnvelope<'a> {
    pub schema_version: u32,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<&'a [FileRecord]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl<'a> From<&'a UploadResult> for UploadEnvelope<'a> {
    fn from(result: &'a UploadResult) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            success: result.is_success(),
            files: result.files(),
            error: result.error(),
        }
    }
}

/// JSON shape of an analysis outcome.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    pub schema_version: u32,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisEnvelope {
    pub fn from_outcome(outcome: &Result<AnalysisView, FlowError>) -> Self {
        match outcome {
            Ok(view) => Self {
                schema_version: SCHEMA_VERSION,
                ok: true,
                analysis: Some(view.clone()),
                error: None,
            },
            Err(err) => Self {
                schema_version: SCHEMA_VERSION,
                ok: false,
                analysis: None,
                error: Some(err.to_string()),
            },
        }
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

// ============================================================================
// Terminal
// ============================================================================

/// How much of each card to print.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardOptions {
    /// Print point details for every card.
    pub all_details: bool,
}

/// File cards: title, file name, one bullet per point, and details for the
/// expanded card (or all cards with `all_details`).
pub fn render_file_cards(
    files: &[FileRecord],
    expansion: &Expansion,
    options: CardOptions,
    painter: Painter,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        painter.heading(&format_count(files.len(), "file uploaded", "files uploaded"))
    );

    for (idx, file) in files.iter().enumerate() {
        let _ = writeln!(out);
        let flags = file.red_flag_count();
        let marker = if flags > 0 {
            format!(
                "  {}",
                painter.flag(&format!("⚠ {}", format_count(flags, "red flag", "red flags")))
            )
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "{} {}{}",
            painter.muted(&format!("[{}]", idx + 1)),
            painter.heading(file.display_title()),
            marker
        );
        let _ = writeln!(out, "    {}", painter.file(&file.file_name));

        if file.points.is_empty() {
            let _ = writeln!(out, "    {}", painter.muted("No summary available"));
            continue;
        }

        let show_details = options.all_details || expansion.is_file_expanded(idx);
        for (p_idx, point) in file.points.iter().enumerate() {
            let bullet = if point.is_red_flag {
                painter.flag("●")
            } else {
                painter.muted("•")
            };
            let _ = writeln!(out, "    {bullet} {}", point.summary);

            let open = options.all_details || expansion.is_point_expanded(idx, p_idx);
            if show_details && open {
                if !point.title.is_empty() {
                    let _ = writeln!(out, "        {}", painter.heading(&point.title));
                }
                if !point.details.is_empty() {
                    let _ = writeln!(out, "        {}", point.details);
                }
            } else if show_details && !point.title.is_empty() {
                let _ = writeln!(out, "        {}", painter.muted(&point.title));
            }
        }
    }
    out
}

/// Verdict, key facts, summary and the findings table.
pub fn render_analysis(view: &AnalysisView, painter: Painter) -> String {
    let mut out = String::new();

    let verdict = status_badge(&view.report.verdict);
    let _ = writeln!(
        out,
        "{} {}",
        painter.heading("Verdict:"),
        painter.badge(&verdict.label, verdict.tone)
    );

    let facts = &view.facts;
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", painter.heading("Key facts"));
    let rows = [
        ("Loan Amount", fmt_curr(facts.loan_amount)),
        ("Interest Rate", fmt_percent(facts.interest_rate_pct)),
        ("APR", fmt_percent(facts.apr)),
        ("Monthly P&I", fmt_curr(facts.monthly_principal_interest)),
        ("Cash to Close", fmt_curr(facts.cash_to_close_amount)),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {:<15} {}", label, value);
    }
    if facts.prepayment_penalty {
        let _ = writeln!(out, "  {}", painter.caution("⚠ Prepayment penalty"));
    }
    if facts.balloon_payment {
        let _ = writeln!(out, "  {}", painter.caution("⚠ Balloon payment"));
    }

    let summary = view.summary.as_deref().filter(|s| !s.trim().is_empty());
    if !view.confidence_notes.is_empty() || summary.is_some() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", painter.heading("Summary"));
        for note in &view.confidence_notes {
            let _ = writeln!(out, "  {} {}", painter.muted("•"), note);
        }
        if let Some(text) = summary {
            let _ = writeln!(out, "  {text}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", painter.heading("Detailed findings"));
    if view.report.items.is_empty() {
        let _ = writeln!(out, "  {}", painter.muted("No findings."));
    }
    for item in &view.report.items {
        let badge = item_badge(item);
        let assessment = assess(item);
        let _ = writeln!(
            out,
            "  {} {}: {}",
            painter.badge(&badge.label, badge.tone),
            friendly_label(&item.section, &item.label),
            observed_display(item)
        );
        let _ = writeln!(
            out,
            "      {}",
            painter.tone(&assessment.headline(), assessment.tone())
        );
        if let Some(detail) = assessment.detail() {
            let _ = writeln!(out, "      {}", painter.muted(&detail));
        }
        if let Some(overpay) = assessment.overpay() {
            let _ = writeln!(out, "      {}", painter.flag(&overpay));
        }
    }
    out
}

// ============================================================================
// HTML
// ============================================================================

/// Write a rendered HTML report, creating parent directories as needed.
pub fn write_html(path: &Path, html: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use disclosure_report::types::{KeyFacts, Observed, Report, ReportItem, Status, SummaryPoint};

    fn files() -> Vec<FileRecord> {
        vec![
            FileRecord {
                file_name: "cd.pdf".into(),
                title: Some("Closing Disclosure".into()),
                points: vec![
                    SummaryPoint {
                        title: "Balloon".into(),
                        summary: "Balloon payment in year 7".into(),
                        details: "A $180,000 payment is due".into(),
                        is_red_flag: true,
                    },
                    SummaryPoint {
                        title: "Rate".into(),
                        summary: "Fixed rate".into(),
                        details: "6.25% for 30 years".into(),
                        is_red_flag: false,
                    },
                ],
            },
            FileRecord {
                file_name: "cd.pdf".into(),
                title: None,
                points: vec![],
            },
        ]
    }

    #[test]
    fn cards_are_collapsed_by_default() {
        let text = render_file_cards(
            &files(),
            &Expansion::default(),
            CardOptions::default(),
            Painter::plain(),
        );
        assert!(text.starts_with("2 files uploaded"));
        assert!(text.contains("[1] Closing Disclosure  ⚠ 1 red flag"));
        assert!(text.contains("[2] cd.pdf"));
        assert!(text.contains("Balloon payment in year 7"));
        assert!(text.contains("No summary available"));
        assert!(!text.contains("A $180,000 payment is due"));
    }

    #[test]
    fn expanded_point_shows_its_details_only() {
        let mut expansion = Expansion::default();
        expansion.toggle_file(0);
        expansion.toggle_point(1);
        let text = render_file_cards(&files(), &expansion, CardOptions::default(), Painter::plain());
        assert!(text.contains("6.25% for 30 years"));
        assert!(!text.contains("A $180,000 payment is due"));
    }

    #[test]
    fn all_details_prints_everything() {
        let text = render_file_cards(
            &files(),
            &Expansion::default(),
            CardOptions { all_details: true },
            Painter::plain(),
        );
        assert!(text.contains("A $180,000 payment is due"));
        assert!(text.contains("6.25% for 30 years"));
    }

    #[test]
    fn analysis_text() {
        let view = AnalysisView {
            facts: KeyFacts {
                loan_amount: Some(400_000.0),
                balloon_payment: true,
                ..Default::default()
            },
            confidence_notes: vec![],
            report: Report {
                verdict: Status::Fail,
                items: vec![ReportItem {
                    section: "E".into(),
                    label: "Recording Fees".into(),
                    observed: Some(Observed::Number(125.0)),
                    status: Status::Warn,
                    ..Default::default()
                }],
            },
            summary: Some(String::new()),
        };
        let text = render_analysis(&view, Painter::plain());
        assert!(text.contains("Verdict: [Needs Action]"));
        assert!(text.contains("$400,000.00"));
        assert!(text.contains("⚠ Balloon payment"));
        assert!(!text.contains("Prepayment"));
        assert!(!text.contains("Summary"));
        assert!(text.contains("[INFO] E: Recording Fees: $125.00"));
        assert!(text.contains("Informational only (not benchmarked)"));
    }

    #[test]
    fn envelopes_carry_schema_version() {
        let ok = UploadResult::Files(files());
        let json = to_json(&UploadEnvelope::from(&ok)).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["success"], true);
        assert_eq!(value["files"].as_array().map(Vec::len), Some(2));
        assert!(value.get("error").is_none());

        let failed = UploadResult::Failed("Upload failed".into());
        let json = to_json(&UploadEnvelope::from(&failed)).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Upload failed");
        assert!(value.get("files").is_none());

        let env = AnalysisEnvelope::from_outcome(&Err(FlowError::Application("bad".into())));
        assert!(!env.ok);
        assert_eq!(env.error.as_deref(), Some("bad"));
    }

    #[test]
    fn write_html_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out").join("report.html");
        write_html(&path, "<!DOCTYPE html>").expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "<!DOCTYPE html>");
    }
}
