//! Error taxonomy.
//!
//! Validation errors are raised before any request is sent, transport
//! errors cover everything between the request and a parsed body, and
//! application errors are failures the backend reported on purpose. The
//! `Display` text of each variant is what the user sees.

use std::path::PathBuf;

use thiserror::Error;

/// Message used when a failure carries no more specific text.
pub const UPLOAD_FAILED: &str = "Upload failed";
/// Default application error for the analyzer endpoint.
pub const ANALYSIS_FAILED: &str = "Analysis failed";

/// Client-side rejection of a selected file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload {} files only", .accepted.join(", "))]
    UnsupportedFormat { accepted: Vec<String> },

    #[error("File size must be less than {max_mb}MB")]
    TooLarge { max_mb: u64 },
}

/// Failure between sending a request and holding a parsed response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout, or an unreadable local file.
    #[error("Upload failed")]
    Network { detail: String },

    /// Non-2xx status. `message` is the body's `error` field when present.
    #[error("{}", status_message(.status, .message))]
    Status { status: u16, message: Option<String> },

    /// 2xx status whose body did not parse.
    #[error("Upload failed")]
    MalformedBody { detail: String },
}

fn status_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => m.clone(),
        _ => format!("Upload failed with status: {status}"),
    }
}

/// Why a flow ended in the error state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend answered but reported a failure.
    #[error("{0}")]
    Application(String),

    /// A second action was requested while one was in flight.
    #[error("An upload is already in progress")]
    Busy,
}

impl FlowError {
    /// Process exit code for this failure: 2 when nothing was sent, else 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            FlowError::Validation(_) => 2,
            _ => 1,
        }
    }
}

/// Startup configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {field}: {value:?} is not an http(s) URL")]
    InvalidUrl { field: &'static str, value: String },

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("identity is required but no publishable key is configured (set DISCLOSURE_PUBLISHABLE_KEY)")]
    MissingPublishableKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages() {
        let err = ValidationError::UnsupportedFormat {
            accepted: vec![".zip".into(), ".pdf".into()],
        };
        assert_eq!(err.to_string(), "Please upload .zip, .pdf files only");
        assert_eq!(
            ValidationError::TooLarge { max_mb: 200 }.to_string(),
            "File size must be less than 200MB"
        );
    }

    #[test]
    fn transport_messages() {
        let net = TransportError::Network {
            detail: "connection refused".into(),
        };
        assert_eq!(net.to_string(), "Upload failed");

        let with_body = TransportError::Status {
            status: 413,
            message: Some("File too large".into()),
        };
        assert_eq!(with_body.to_string(), "File too large");

        let bare = TransportError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(bare.to_string(), "Upload failed with status: 500");
    }

    #[test]
    fn exit_codes() {
        assert_eq!(FlowError::from(ValidationError::TooLarge { max_mb: 10 }).exit_code(), 2);
        assert_eq!(FlowError::Application("x".into()).exit_code(), 1);
    }
}
