//! CSS for the review report.
//!
//! The page is static: expand/collapse uses native `<details>` elements, so
//! no script is needed and the CSP forbids it.
//!
//! # Customization
//!
//! ```rust
//! use disclosure_report::styles::REPORT_CSS;
//!
//! let my_css = ".file-card { border-width: 2px; }";
//! let combined = format!("{}\n{}", REPORT_CSS, my_css);
//! assert!(combined.contains(".badge"));
//! ```

/// Complete CSS for the report.
///
/// Covers page layout, file cards, the findings table, status badges
/// and the key facts grid.
pub const REPORT_CSS: &str = r#"
:root {
    --bg-page: #0e0702;
    --bg-panel: #f5ebe5;
    --bg-card: #fdf7f3;
    --bg-detail: #2f2932;
    --text-strong: #1a1108;
    --text-body: #3f3a36;
    --text-muted: #7a726c;
    --text-inverse: #f7f3ed;
    --border-soft: #f1ded4;
    --border-table: #d6d5d5;
    --accent-brand: #f46c3a;
    --accent-soft: #f7c29c;
    --font-sans: system-ui, -apple-system, 'Segoe UI', sans-serif;
    --container-max: 1100px;
}

*, *::before, *::after {
    box-sizing: border-box;
}

body {
    font-family: var(--font-sans);
    background: var(--bg-page);
    color: var(--text-inverse);
    line-height: 1.5;
    margin: 0;
    min-height: 100vh;
}

.icon {
    vertical-align: -3px;
    flex-shrink: 0;
}

.icon-sm {
    width: 16px;
    height: 16px;
}

.container {
    max-width: var(--container-max);
    margin: 0 auto;
    padding: 32px 24px 80px;
}

.report-header {
    margin-bottom: 24px;
}

.report-header h1 {
    font-size: 28px;
    margin: 0 0 4px;
}

.report-header .meta {
    color: var(--accent-soft);
    font-size: 13px;
}

.panel {
    background: var(--bg-panel);
    color: var(--text-strong);
    border: 1px solid var(--border-soft);
    border-radius: 24px;
    padding: 28px;
    margin-bottom: 24px;
}

.panel h2, .panel h3 {
    margin-top: 0;
}

.muted {
    color: var(--text-muted);
}

.error-banner {
    background: rgba(127, 29, 29, 0.5);
    border: 1px solid #ef4444;
    color: #fecaca;
    border-radius: 12px;
    padding: 16px;
    text-align: center;
}

/* File cards */
.card-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
    gap: 20px;
}

.file-card {
    background: var(--bg-card);
    border: 1px solid var(--border-soft);
    border-radius: 16px;
    padding: 20px;
}

.file-card h3 {
    font-size: 17px;
    margin: 0 0 4px;
}

.file-card .file-name {
    font-size: 12px;
    color: var(--text-muted);
    margin-bottom: 12px;
}

.file-card ul {
    margin: 0;
    padding-left: 18px;
    color: var(--text-body);
}

.point-details {
    margin-top: 16px;
    background: var(--bg-detail);
    color: var(--text-inverse);
    border-radius: 12px;
    padding: 12px 16px;
}

.point-details summary {
    cursor: pointer;
    color: var(--accent-soft);
    font-weight: 600;
}

.point {
    border-top: 1px solid #4b434f;
    padding: 10px 0;
}

.point-title {
    font-weight: 600;
    color: var(--accent-soft);
}

.point-body {
    font-size: 13px;
    opacity: 0.9;
    margin-top: 6px;
}

.red-flag .point-title,
li.red-flag {
    color: #dc2626;
}

.flag-marker {
    display: inline-block;
    margin-left: 6px;
    font-size: 11px;
    font-weight: 700;
    color: #dc2626;
}

/* Verdict + key facts */
.overview-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
    gap: 20px;
}

.facts-grid {
    display: grid;
    grid-template-columns: repeat(3, minmax(0, 1fr));
    gap: 12px;
    margin-top: 12px;
}

.fact-label {
    display: block;
    font-size: 12px;
    color: var(--text-muted);
}

.fact-value {
    font-size: 17px;
    font-weight: 600;
}

.loan-warning {
    margin-top: 12px;
    background: rgba(234, 88, 12, 0.12);
    border: 1px solid rgba(234, 88, 12, 0.5);
    border-radius: 10px;
    padding: 10px 12px;
    font-size: 13px;
}

/* Findings table */
.data-table {
    width: 100%;
    border-collapse: collapse;
}

.data-table th,
.data-table td {
    border-bottom: 1px solid var(--border-table);
    padding: 10px;
    text-align: left;
    vertical-align: top;
}

.data-table .section-code {
    font-size: 11px;
    color: var(--text-muted);
}

.data-table .sub {
    font-size: 12px;
    color: var(--text-muted);
    margin-top: 2px;
}

.range-chip {
    display: inline-block;
    margin-top: 4px;
    font-size: 12px;
    background: #f3f4f6;
    border-radius: 6px;
    padding: 2px 8px;
    color: #4b5563;
}

.overpay {
    margin-top: 6px;
    font-size: 12px;
    font-weight: 600;
    color: var(--accent-brand);
}

/* Badges */
.badge {
    display: inline-block;
    padding: 4px 12px;
    border-radius: 999px;
    font-size: 12px;
    font-weight: 700;
}

.badge-green { background: #14532d; color: #dcfce7; }
.badge-amber { background: #fff7ed; color: #7c2d12; }
.badge-red { background: #7f1d1d; color: #fbcfe8; }
.badge-grey { background: #e5e7eb; color: #111827; }
.badge-blue { background: #dbeafe; color: #1e40af; }

.tone-green { color: #15803d; }
.tone-amber { color: #b45309; }
.tone-red { color: #b91c1c; }
.tone-grey { color: var(--text-body); }
.tone-blue { color: #2563eb; }

.no-findings {
    color: var(--text-muted);
    font-style: italic;
}
"#;

/// Content Security Policy header value
pub const CSP: &str = "default-src 'none'; img-src data:; style-src 'unsafe-inline'; script-src 'none';";
