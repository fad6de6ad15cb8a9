//! Response normalization.
//!
//! Turns freshly parsed wire responses into the canonical schema. Every
//! optional-but-required field gets a concrete value here, so nothing past
//! this boundary checks for a missing `is_red_flag`, `points` or summary
//! string.

use disclosure_report::types::{AnalysisView, FileRecord, KeyFacts, SummaryPoint};

use crate::api::{AnalyzeResponse, ExtractedData, UploadResponse, WireFile, WirePoint};
use crate::error::{ANALYSIS_FAILED, FlowError, TransportError, UPLOAD_FAILED};

/// Outcome of an upload. Exactly one of files or error exists.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadResult {
    Files(Vec<FileRecord>),
    Failed(String),
}

impl UploadResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadResult::Files(_))
    }

    pub fn files(&self) -> Option<&[FileRecord]> {
        match self {
            UploadResult::Files(files) => Some(files),
            UploadResult::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UploadResult::Files(_) => None,
            UploadResult::Failed(message) => Some(message),
        }
    }
}

impl From<TransportError> for UploadResult {
    fn from(err: TransportError) -> Self {
        UploadResult::Failed(err.to_string())
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

fn point(wire: WirePoint) -> SummaryPoint {
    SummaryPoint {
        title: wire.title.unwrap_or_default(),
        summary: wire.summary.unwrap_or_default(),
        details: wire.details.unwrap_or_default(),
        is_red_flag: wire.is_red_flag.unwrap_or(false),
    }
}

fn file_record(wire: WireFile) -> FileRecord {
    FileRecord {
        file_name: wire.file_name.unwrap_or_default(),
        title: non_empty(wire.title),
        points: wire
            .points
            .unwrap_or_default()
            .into_iter()
            .map(point)
            .collect(),
    }
}

/// Normalize a parsed `/api/upload` body.
///
/// `success: false` surfaces the backend's `error` verbatim. `success: true`
/// without `files` is a failure as well; both fall back to `Upload failed`.
pub fn normalize_upload(response: UploadResponse) -> UploadResult {
    if !response.success {
        return UploadResult::Failed(
            non_empty(response.error).unwrap_or_else(|| UPLOAD_FAILED.to_string()),
        );
    }
    match response.files {
        Some(files) => UploadResult::Files(files.into_iter().map(file_record).collect()),
        None => UploadResult::Failed(UPLOAD_FAILED.to_string()),
    }
}

/// Flatten extracted loan data into display facts.
///
/// APR prefers `loan_terms.apr` and falls back to
/// `loan_calculations.apr_pct`.
pub fn key_facts(extracted: &ExtractedData) -> KeyFacts {
    let terms = extracted.loan_terms.clone().unwrap_or_default();
    let info = extracted.loan_information.clone().unwrap_or_default();
    let calc = extracted.loan_calculations.clone().unwrap_or_default();
    let txn = extracted
        .summaries_of_transactions
        .clone()
        .and_then(|s| s.borrowers_transaction)
        .unwrap_or_default();

    KeyFacts {
        loan_amount: terms.loan_amount,
        interest_rate_pct: terms.interest_rate_pct,
        apr: terms.apr.or(calc.apr_pct),
        monthly_principal_interest: terms.monthly_principal_interest,
        loan_term_years: info.loan_term_years,
        loan_product: non_empty(info.product),
        loan_type: non_empty(info.loan_type),
        cash_to_close_amount: txn.cash_to_close_amount,
        cash_to_close_direction: non_empty(txn.cash_to_close_direction),
        prepayment_penalty: terms.prepayment_penalty.is_some_and(|p| p.is_present()),
        balloon_payment: terms.balloon_payment.is_some_and(|p| p.is_present()),
    }
}

/// Normalize a parsed `/api/analyze` body. The summary is attached later by
/// the flow.
pub fn normalize_analysis(response: AnalyzeResponse) -> Result<AnalysisView, FlowError> {
    if !response.ok {
        return Err(FlowError::Application(
            non_empty(response.error).unwrap_or_else(|| ANALYSIS_FAILED.to_string()),
        ));
    }

    let extracted = response.extracted.unwrap_or_default();
    Ok(AnalysisView {
        facts: key_facts(&extracted),
        confidence_notes: extracted.confidence_notes.unwrap_or_default(),
        report: response.report.unwrap_or_default(),
        summary: None,
    })
}
