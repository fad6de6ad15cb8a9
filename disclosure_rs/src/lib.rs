//! # disclosure
//!
//! **Closing Disclosure review client** - validates a mortgage Closing
//! Disclosure (or a batch archive of them), sends it to a review backend,
//! and presents the normalized findings in the terminal, as JSON, or as a
//! static HTML report.
//!
//! ## Flows
//!
//! - **Upload** - a `.zip` batch goes to the upload service; each contained
//!   file comes back as a card with summary points and red flags.
//! - **Analysis** - a single `.pdf` goes to the analyzer; the result is a
//!   verdict, key loan facts, benchmarked line items and an optional
//!   plain-language summary.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust
//! use disclosure::config::FileLimits;
//! use disclosure::validate::{FileMeta, validate};
//!
//! let limits = FileLimits::analyze_defaults();
//! assert!(validate(&FileMeta::new("closing.pdf", 1024), &limits).is_ok());
//! assert!(validate(&FileMeta::new("closing.docx", 1024), &limits).is_err());
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! disclosure validate batch.zip            # Check format and size only
//! disclosure upload batch.zip --open 1     # Upload and expand the first card
//! disclosure analyze closing.pdf --html report.html
//! disclosure render saved.json --kind analysis --json
//! ```

pub mod api;
pub mod cli;
pub mod colors;
pub mod config;
pub mod error;
pub mod flow;
pub mod normalize;
pub mod output;
pub mod progress;
pub mod session;
pub mod transport;
pub mod validate;

pub use error::{FlowError, TransportError, ValidationError};
pub use normalize::UploadResult;
pub use transport::{Backend, HttpBackend, SelectedFile};
