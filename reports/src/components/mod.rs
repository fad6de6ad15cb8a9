//! Leptos UI components for rendering review reports.
//!
//! Each component is a Leptos `#[component]` function rendered once on the
//! server; nothing hydrates.
//!
//! # Component Hierarchy
//!
//! ```text
//! ReportDocument
//! ├── ErrorBanner (failed flow)
//! ├── FileCards (upload flow)
//! │   └── FileCard
//! │       └── <details> per-point breakdown
//! └── analysis flow
//!     ├── VerdictPanel
//!     │   ├── StatusBadge
//!     │   └── KeyFactsGrid
//!     ├── SummaryPanel
//!     └── FindingsTable
//!         └── ItemBadge
//! ```
//!
//! # Usage
//!
//! Components are normally reached through [`crate::render_upload_report`]
//! and [`crate::render_analysis_report`], but compose directly too:
//!
//! ```rust,ignore
//! use leptos::prelude::*;
//! use disclosure_report::components::{FileCards, ReportDocument};
//!
//! view! {
//!     <ReportDocument title="Batch".to_string()>
//!         <FileCards files=records />
//!     </ReportDocument>
//! }
//! ```

mod document;
mod file_cards;
mod findings;
mod icons;
mod key_facts;
mod overview;
mod status_badge;

pub use document::{ErrorBanner, ReportDocument};
pub use file_cards::{FileCard, FileCards};
pub use findings::FindingsTable;
pub use icons::*;
pub use key_facts::KeyFactsGrid;
pub use overview::{SummaryPanel, VerdictPanel};
pub use status_badge::{ItemBadge, StatusBadge};
