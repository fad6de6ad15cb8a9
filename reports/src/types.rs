//! Canonical data model for review results.
//!
//! Every surface (terminal, JSON, HTML) consumes these types and nothing
//! else. Wire shapes returned by the backend are normalized into them by the
//! client crate; here every field is concrete, so components never branch on
//! missing values.
//!
//! - **Serializable** - JSON output is this schema plus [`SCHEMA_VERSION`]
//! - **Clone-friendly** - components take owned data
//! - **Default-able** - build partial fixtures with `..Default::default()`
//!
//! # Example
//!
//! ```rust
//! use disclosure_report::types::{FileRecord, SummaryPoint};
//!
//! let record = FileRecord {
//!     file_name: "closing.pdf".into(),
//!     title: Some("Closing Disclosure".into()),
//!     points: vec![SummaryPoint {
//!         title: "Lender fees".into(),
//!         summary: "Origination is above typical".into(),
//!         is_red_flag: true,
//!         ..Default::default()
//!     }],
//! };
//! assert_eq!(record.display_title(), "Closing Disclosure");
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Version of the canonical response schema emitted in JSON output.
pub const SCHEMA_VERSION: u32 = 1;

/// One summarized document from an upload batch.
///
/// `file_name` is not unique across a batch (a ZIP may contain the same name
/// in two folders), so views address records by position.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub points: Vec<SummaryPoint>,
}

impl FileRecord {
    /// Title when the backend produced one, otherwise the file name.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => &self.file_name,
        }
    }

    /// Number of points flagged for attention.
    pub fn red_flag_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_red_flag).count()
    }
}

/// A single finding inside a [`FileRecord`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryPoint {
    pub title: String,
    pub summary: String,
    pub details: String,
    #[serde(default)]
    pub is_red_flag: bool,
}

/// Benchmark status of a report item or overall verdict.
///
/// The set is closed on the wire, but unknown values are preserved verbatim
/// so they can still be displayed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum Status {
    Pass,
    Warn,
    Fail,
    Unknown(String),
}

impl Default for Status {
    fn default() -> Self {
        Status::Unknown(String::new())
    }
}

impl Status {
    /// Parse a wire value; comparison is case-insensitive.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PASS" => Status::Pass,
            "WARN" => Status::Warn,
            "FAIL" => Status::Fail,
            _ => Status::Unknown(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Pass => "PASS",
            Status::Warn => "WARN",
            Status::Fail => "FAIL",
            Status::Unknown(raw) => raw,
        }
    }
}

/// Any JSON value is accepted: `null` is an empty unknown, other non-strings
/// keep their JSON text.
impl From<Value> for Status {
    fn from(raw: Value) -> Self {
        match raw {
            Value::String(s) => Status::parse(&s),
            Value::Null => Status::Unknown(String::new()),
            other => Status::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        Status::parse(&raw)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed value of a report item. The backend sends either a formatted
/// string (`"$1,250.00 (25 bps)"`) or a bare number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Observed {
    Number(f64),
    Text(String),
}

impl fmt::Display for Observed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observed::Number(n) => write!(f, "{n}"),
            Observed::Text(s) => f.write_str(s),
        }
    }
}

/// Values the backend computed while benchmarking an item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Computed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<f64>,
}

/// One benchmarked line of a Closing Disclosure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub section: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed: Option<Observed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed: Option<Computed>,
}

/// Missing or `null` becomes empty; numbers and booleans keep their JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Benchmark report: overall verdict plus per-item findings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub verdict: Status,
    #[serde(default)]
    pub items: Vec<ReportItem>,
}

/// Key loan facts pulled from the disclosure, flattened for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyFacts {
    pub loan_amount: Option<f64>,
    pub interest_rate_pct: Option<f64>,
    pub apr: Option<f64>,
    pub monthly_principal_interest: Option<f64>,
    pub loan_term_years: Option<f64>,
    pub loan_product: Option<String>,
    pub loan_type: Option<String>,
    pub cash_to_close_amount: Option<f64>,
    pub cash_to_close_direction: Option<String>,
    #[serde(default)]
    pub prepayment_penalty: bool,
    #[serde(default)]
    pub balloon_payment: bool,
}

/// Normalized result of the analyzer flow.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisView {
    pub facts: KeyFacts,
    #[serde(default)]
    pub confidence_notes: Vec<String>,
    pub report: Report,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}
