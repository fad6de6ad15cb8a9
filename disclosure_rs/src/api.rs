//! Wire shapes returned by the backends.
//!
//! Everything here is lenient: fields the backend may omit are `Option` or
//! defaulted, and unknown fields are ignored. [`crate::normalize`] turns
//! these into the canonical types of `disclosure_report::types`.

use disclosure_report::types::Report;
use serde::{Deserialize, Serialize};

/// `POST /api/upload` response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<WireFile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One file entry of an upload response. Some backend variants add `size`,
/// `path` or `fullSummary`; they are not displayed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WireFile {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub points: Option<Vec<WirePoint>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WirePoint {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub is_red_flag: Option<bool>,
}

/// Body of a non-2xx response; only `error` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /api/analyze` response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted: Option<ExtractedData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractedData {
    pub loan_terms: Option<LoanTerms>,
    pub loan_information: Option<LoanInformation>,
    pub loan_calculations: Option<LoanCalculations>,
    pub summaries_of_transactions: Option<SummariesOfTransactions>,
    pub confidence_notes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoanTerms {
    pub loan_amount: Option<f64>,
    pub interest_rate_pct: Option<f64>,
    pub apr: Option<f64>,
    pub monthly_principal_interest: Option<f64>,
    pub prepayment_penalty: Option<Presence>,
    pub balloon_payment: Option<Presence>,
}

/// A loan feature sent either as a bare boolean or as `{ "has": bool }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Presence {
    Flag(bool),
    Detailed {
        #[serde(default)]
        has: Option<bool>,
    },
}

impl Presence {
    pub fn is_present(self) -> bool {
        match self {
            Presence::Flag(b) => b,
            Presence::Detailed { has } => has.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoanInformation {
    pub loan_term_years: Option<f64>,
    pub product: Option<String>,
    pub loan_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoanCalculations {
    pub apr_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SummariesOfTransactions {
    pub borrowers_transaction: Option<BorrowersTransaction>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BorrowersTransaction {
    pub cash_to_close_amount: Option<f64>,
    pub cash_to_close_direction: Option<String>,
}

/// `POST /api/summary` response. The request body is the bare item array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use disclosure_report::types::Status;

    #[test]
    fn presence_accepts_both_shapes() {
        let terms: LoanTerms = serde_json::from_str(
            r#"{"prepayment_penalty": true, "balloon_payment": {"has": false}}"#,
        )
        .unwrap();
        assert_eq!(terms.prepayment_penalty.map(Presence::is_present), Some(true));
        assert_eq!(terms.balloon_payment.map(Presence::is_present), Some(false));

        let terms: LoanTerms = serde_json::from_str(r#"{"balloon_payment": {}}"#).unwrap();
        assert_eq!(terms.balloon_payment.map(Presence::is_present), Some(false));
    }

    #[test]
    fn upload_response_tolerates_extra_fields() {
        let body = r#"{
            "success": true,
            "message": "ok",
            "files": [
                {"file_name": "a.pdf", "name": "a.pdf", "path": "/tmp/a.pdf", "size": 12, "fullSummary": ["x"],
                 "points": [{"title": "t", "summary": "s", "details": "d"}]}
            ]
        }"#;
        let parsed: UploadResponse = serde_json::from_str(body).unwrap();
        let files = parsed.files.unwrap();
        assert_eq!(files[0].file_name.as_deref(), Some("a.pdf"));
        assert_eq!(files[0].points.as_ref().unwrap()[0].is_red_flag, None);
    }

    #[test]
    fn analyze_response_keeps_report_with_odd_statuses() {
        let body = r#"{"ok": true, "report": {"verdict": 3, "items": [
            {"section": "A", "label": "Origination Charges", "status": null},
            {"section": "B", "status": true}
        ]}}"#;
        let parsed: AnalyzeResponse = serde_json::from_str(body).unwrap();
        let report = parsed.report.unwrap();
        assert_eq!(report.verdict, Status::Unknown("3".into()));
        assert_eq!(report.items[0].status, Status::Unknown(String::new()));
        assert_eq!(report.items[1].label, "");
    }

    #[test]
    fn analyze_response_with_nulls() {
        let body = r#"{"ok": true, "extracted": {"loan_terms": null, "confidence_notes": null}}"#;
        let parsed: AnalyzeResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.ok);
        assert!(parsed.report.is_none());
        assert!(parsed.extracted.unwrap().loan_terms.is_none());
    }
}
