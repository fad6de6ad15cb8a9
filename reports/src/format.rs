//! Presentation helpers: currency, badges, basis points, assessments.
//!
//! Every function here is total over its input. Malformed or missing values
//! produce a placeholder or `None`, never a panic, so both the terminal and
//! HTML surfaces can call them on whatever the backend sent.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Observed, ReportItem, Status};

/// Placeholder shown for missing values.
pub const PLACEHOLDER: &str = "—";

/// Sections reported by the backend but never benchmarked.
pub const INFORMATIONAL_SECTIONS: &[&str] = &["D", "E", "F", "G", "I"];

static BPS_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$?([\d,]+\.?\d*)\s*\(?([\d.]+)\s*bps\)?").expect("valid bps pattern")
});
static BPS_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\d.]+)-([\d.]+)\s*bps").expect("valid range pattern"));
static SIGNED_PCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?(\d+)%").expect("valid percent pattern"));

// ============================================================================
// Numbers
// ============================================================================

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn dollars(value: f64, decimals: usize) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let grouped = group_thousands(int_part);
    match frac_part {
        Some(frac) => format!("{sign}${grouped}.{frac}"),
        None => format!("{sign}${grouped}"),
    }
}

/// Format an amount as US currency with two decimals.
///
/// ```rust
/// use disclosure_report::format::fmt_curr;
///
/// assert_eq!(fmt_curr(Some(1234.5)), "$1,234.50");
/// assert_eq!(fmt_curr(None), "—");
/// assert_eq!(fmt_curr(Some(f64::NAN)), "—");
/// ```
pub fn fmt_curr(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => dollars(v, 2),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Whole-dollar amount, used for benchmark range bounds.
pub fn fmt_whole_dollars(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    dollars(value, 0)
}

/// `6.5` -> `6.5%`, missing -> placeholder.
pub fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v}%"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Express basis points as a share of the loan: `25` -> `0.25% of loan`.
pub fn percent_of_loan(bps: f64) -> String {
    format!("{:.2}% of loan", bps / 100.0)
}

// ============================================================================
// Badges
// ============================================================================

/// Visual tone shared by terminal colours and HTML badge classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Green,
    Amber,
    Red,
    Grey,
    Blue,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Green => "badge badge-green",
            Tone::Amber => "badge badge-amber",
            Tone::Red => "badge badge-red",
            Tone::Grey => "badge badge-grey",
            Tone::Blue => "badge badge-blue",
        }
    }
}

/// Label and tone for a status badge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

/// Map a status to its badge. Unknown values show verbatim in grey.
pub fn status_badge(status: &Status) -> Badge {
    let (label, tone) = match status {
        Status::Pass => ("All Good".to_string(), Tone::Green),
        Status::Warn => ("Check Details".to_string(), Tone::Amber),
        Status::Fail => ("Needs Action".to_string(), Tone::Red),
        Status::Unknown(raw) if raw.trim().is_empty() => (PLACEHOLDER.to_string(), Tone::Grey),
        Status::Unknown(raw) => (raw.clone(), Tone::Grey),
    };
    Badge { label, tone }
}

/// Badge for a findings row; informational sections always read `INFO`.
pub fn item_badge(item: &ReportItem) -> Badge {
    if is_informational_only(&item.section) {
        Badge {
            label: "INFO".into(),
            tone: Tone::Blue,
        }
    } else {
        status_badge(&item.status)
    }
}

// ============================================================================
// Basis points and ranges
// ============================================================================

/// Amount and basis points extracted from an observed value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BpsAmount {
    pub amount: Option<f64>,
    pub bps: Option<f64>,
}

/// Parse `"$1,250.00 (25 bps)"` into `{amount: 1250, bps: 25}`.
///
/// A bare numeric observation yields the amount without bps; anything else
/// (including zero or an empty string) yields neither.
pub fn parse_bps_and_amount(observed: Option<&Observed>) -> BpsAmount {
    let text = match observed {
        None => return BpsAmount::default(),
        Some(Observed::Number(n)) if *n == 0.0 || !n.is_finite() => {
            return BpsAmount::default();
        }
        Some(Observed::Number(n)) => n.to_string(),
        Some(Observed::Text(s)) if s.is_empty() => return BpsAmount::default(),
        Some(Observed::Text(s)) => s.clone(),
    };

    if let Some(caps) = BPS_AMOUNT_RE.captures(&text) {
        let amount = caps[1].replace(',', "").parse::<f64>().ok();
        let bps = caps[2].parse::<f64>().ok();
        if amount.is_some() && bps.is_some() {
            return BpsAmount { amount, bps };
        }
    }

    match observed {
        Some(Observed::Number(n)) => BpsAmount {
            amount: Some(*n),
            bps: None,
        },
        _ => BpsAmount::default(),
    }
}

/// Benchmark range in basis points, with dollar bounds when the loan amount
/// is known.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExpectedRange {
    pub min_bps: f64,
    pub max_bps: f64,
    pub min_dollars: Option<f64>,
    pub max_dollars: Option<f64>,
}

impl ExpectedRange {
    /// `$520 - $1,160` when dollar bounds exist, else `18-40 bps`.
    pub fn describe(&self) -> String {
        match (self.min_dollars, self.max_dollars) {
            (Some(lo), Some(hi)) => format!("{} - {}", fmt_whole_dollars(lo), fmt_whole_dollars(hi)),
            _ => format!("{}-{} bps", self.min_bps, self.max_bps),
        }
    }
}

/// Parse `"18-40 bps (median: 29 bps)"`. Returns `None` when the string does
/// not carry a bps range.
pub fn parse_expected_range(expected: Option<&str>, loan_amount: Option<f64>) -> Option<ExpectedRange> {
    let caps = BPS_RANGE_RE.captures(expected?)?;
    let min_bps = caps[1].parse::<f64>().ok()?;
    let max_bps = caps[2].parse::<f64>().ok()?;

    let loan = loan_amount.filter(|v| v.is_finite() && *v != 0.0);
    Some(ExpectedRange {
        min_bps,
        max_bps,
        min_dollars: loan.map(|l| l * min_bps / 10_000.0),
        max_dollars: loan.map(|l| l * max_bps / 10_000.0),
    })
}

/// Sections the backend reports without benchmarking.
pub fn is_informational_only(section: &str) -> bool {
    INFORMATIONAL_SECTIONS.contains(&section)
}

// ============================================================================
// Labels and assessments
// ============================================================================

fn consumer_wording(code: &str) -> Option<&'static str> {
    Some(match code {
        "Totals" => "Math Check",
        "D + I equals J" => "Total Costs Add Up Correctly",
        "A" => "Lender Fees",
        "Origination Charges" => "Lender Fees & Points",
        "B" => "Required Services",
        "Services Borrower Did Not Shop For" => "Required Third-Party Services",
        "C" => "Optional Services",
        "Services Borrower Did Shop For" => "Services You Could Shop For",
        "J" => "Total Costs",
        "Total Closing Costs" => "All Closing Costs Combined",
        _ => return None,
    })
}

/// Consumer-facing label for a findings row.
pub fn friendly_label(section: &str, label: &str) -> String {
    let item_label = consumer_wording(label).unwrap_or(label);
    if section == "Totals" {
        return item_label.to_string();
    }
    let section_label = consumer_wording(section).unwrap_or(section);
    format!("{section_label}: {item_label}")
}

/// Display string for the "You're paying" column.
pub fn observed_display(item: &ReportItem) -> String {
    let parsed = parse_bps_and_amount(item.observed.as_ref());
    match (parsed.amount, item.observed.as_ref()) {
        (Some(amount), _) => fmt_curr(Some(amount)),
        (None, Some(observed)) => observed.to_string(),
        (None, None) => PLACEHOLDER.to_string(),
    }
}

/// How far a fee sits above the benchmark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    VeryHigh,
    High,
    Elevated,
    Slight,
}

impl Severity {
    /// Band for a fee outside its benchmark range.
    fn for_range(percent: u32) -> Self {
        match percent {
            p if p > 200 => Severity::VeryHigh,
            p if p > 100 => Severity::High,
            _ => Severity::Elevated,
        }
    }

    /// Band for a fee compared against the median only.
    fn for_median(percent: u32) -> Self {
        match percent {
            p if p > 200 => Severity::VeryHigh,
            p if p > 100 => Severity::High,
            p if p > 50 => Severity::Elevated,
            _ => Severity::Slight,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::VeryHigh => "VERY HIGH",
            Severity::High => "HIGH",
            Severity::Elevated => "Above normal",
            Severity::Slight => "Slightly above average",
        }
    }
}

/// Plain-language reading of one findings row.
#[derive(Clone, Debug, PartialEq)]
pub enum Assessment {
    Informational { note: Option<String> },
    TotalsMatch,
    TotalsMismatch,
    ZeroFee { note: String, range: ExpectedRange },
    WithinRange { range: Option<ExpectedRange> },
    AboveRange {
        severity: Severity,
        percent: Option<u32>,
        range: ExpectedRange,
        overpay: Option<f64>,
    },
    AboveMedian { severity: Severity, percent: u32 },
    BelowMedian { percent: Option<u32> },
    Note(String),
}

fn first_percent(note: &str) -> Option<u32> {
    SIGNED_PCT_RE
        .captures(note)
        .and_then(|c| c[1].parse::<u32>().ok())
}

/// Assess a findings row the way the results table explains it.
pub fn assess(item: &ReportItem) -> Assessment {
    let note = item.note.clone().unwrap_or_default();

    if is_informational_only(&item.section) {
        return Assessment::Informational {
            note: item.note.clone().filter(|n| !n.is_empty()),
        };
    }

    if item.section == "Totals" {
        return if item.status == Status::Pass {
            Assessment::TotalsMatch
        } else {
            Assessment::TotalsMismatch
        };
    }

    let parsed = parse_bps_and_amount(item.observed.as_ref());
    let loan_amount = item.computed.as_ref().and_then(|c| c.loan_amount);
    let range = parse_expected_range(item.expected.as_deref(), loan_amount);

    if let Some(range) = range {
        match item.status {
            Status::Pass if parsed.amount == Some(0.0) && !note.is_empty() => {
                return Assessment::ZeroFee { note, range };
            }
            Status::Pass => return Assessment::WithinRange { range: Some(range) },
            Status::Fail | Status::Warn => {
                let percent = first_percent(&note);
                let overpay = match (parsed.amount, range.max_dollars) {
                    (Some(amount), Some(max)) if amount != 0.0 => Some(amount - max),
                    _ => None,
                };
                return Assessment::AboveRange {
                    severity: Severity::for_range(percent.unwrap_or(0)),
                    percent,
                    range,
                    overpay,
                };
            }
            Status::Unknown(_) => {}
        }
    }

    if note.contains("above median") {
        if let Some(percent) = first_percent(&note) {
            return Assessment::AboveMedian {
                severity: Severity::for_median(percent),
                percent,
            };
        }
    }

    if note.contains("below median") {
        return Assessment::BelowMedian {
            percent: first_percent(&note),
        };
    }

    if item.status == Status::Pass {
        return Assessment::WithinRange { range: None };
    }

    if note.is_empty() {
        Assessment::Note(PLACEHOLDER.to_string())
    } else {
        Assessment::Note(note)
    }
}

impl Assessment {
    /// Main sentence of the assessment.
    pub fn headline(&self) -> String {
        match self {
            Assessment::Informational { .. } => "Informational only (not benchmarked)".into(),
            Assessment::TotalsMatch => "✓ The numbers add up correctly".into(),
            Assessment::TotalsMismatch => {
                "⚠ The totals don't match (possible calculation error)".into()
            }
            Assessment::ZeroFee { note, .. } => format!("✓ {note}"),
            Assessment::WithinRange { .. } => "✓ Within normal range".into(),
            Assessment::AboveRange {
                severity,
                percent: Some(p),
                ..
            } => format!("⚠ {} - {p}% more than typical", severity.label()),
            Assessment::AboveRange { severity, .. } => {
                format!("⚠ {} - more than typical", severity.label())
            }
            Assessment::AboveMedian { severity, percent } => match severity {
                Severity::VeryHigh | Severity::High => format!(
                    "⚠ {} - You're paying {percent}% more than typical",
                    severity.label()
                ),
                Severity::Elevated => format!("Higher than typical by {percent}%"),
                Severity::Slight => format!("Slightly above average ({percent}% more)"),
            },
            Assessment::BelowMedian { percent: Some(p) } => format!("✓ Good deal - {p}% below typical"),
            Assessment::BelowMedian { percent: None } => "✓ Good deal - below typical".into(),
            Assessment::Note(note) => note.clone(),
        }
    }

    /// Secondary line: the benchmark range, or the informational note.
    pub fn detail(&self) -> Option<String> {
        match self {
            Assessment::Informational { note } => note.clone(),
            Assessment::ZeroFee { range, .. } => Some(format!("Typical range: {}", range.describe())),
            Assessment::WithinRange { range: Some(range) } | Assessment::AboveRange { range, .. } => {
                Some(format!("Fair range: {}", range.describe()))
            }
            _ => None,
        }
    }

    /// Estimated overpayment line for fees above their range.
    pub fn overpay(&self) -> Option<String> {
        match self {
            Assessment::AboveRange {
                overpay: Some(amount),
                ..
            } => Some(format!(
                "You may be overpaying by ~{}",
                fmt_whole_dollars(*amount)
            )),
            _ => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Assessment::Informational { .. } => Tone::Blue,
            Assessment::TotalsMatch
            | Assessment::ZeroFee { .. }
            | Assessment::WithinRange { .. }
            | Assessment::BelowMedian { .. } => Tone::Green,
            Assessment::TotalsMismatch => Tone::Red,
            Assessment::AboveRange { severity, .. } | Assessment::AboveMedian { severity, .. } => {
                match severity {
                    Severity::VeryHigh | Severity::High => Tone::Red,
                    _ => Tone::Amber,
                }
            }
            Assessment::Note(_) => Tone::Grey,
        }
    }
}

/// Cash-to-close direction as prose: `from_borrower` -> `from borrower`.
pub fn direction_label(direction: &str) -> String {
    direction.replace('_', " ")
}
