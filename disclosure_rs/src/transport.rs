//! HTTP transport to the review backends.
//!
//! [`Backend`] is the seam the flows talk to. [`HttpBackend`] is the
//! `reqwest` implementation; tests drive the flows with in-memory doubles.
//! Each call is a single request: no retries, default client timeouts.

use std::path::PathBuf;

use async_trait::async_trait;
use disclosure_report::types::ReportItem;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::api::{AnalyzeResponse, ErrorBody, SummaryResponse, UploadResponse};
use crate::config::AppConfig;
use crate::error::TransportError;
use crate::validate::FileMeta;

/// A file chosen for upload: validated metadata plus where the bytes live.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub meta: FileMeta,
    source: Source,
}

#[derive(Debug, Clone)]
enum Source {
    Disk(PathBuf),
    Memory(Vec<u8>),
}

impl SelectedFile {
    /// Stat a file on disk. The contents are read only when sent.
    pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let meta = FileMeta::from_path(&path)?;
        Ok(Self {
            meta,
            source: Source::Disk(path),
        })
    }

    pub fn in_memory(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            meta: FileMeta::new(name, bytes.len() as u64),
            source: Source::Memory(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            Source::Disk(path) => tokio::fs::read(path).await,
            Source::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

/// Operations offered by the review backends.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST {backend}/api/upload` with the file as multipart field `file`.
    async fn upload(&self, file: &SelectedFile) -> Result<UploadResponse, TransportError>;

    /// `POST {api}/api/analyze?fast=<bool>` with the PDF as multipart
    /// field `file`.
    async fn analyze(
        &self,
        file: &SelectedFile,
        fast: bool,
    ) -> Result<AnalyzeResponse, TransportError>;

    /// `POST {api}/api/summary` with the report items as a JSON array.
    /// A response without `summary` yields an empty string.
    async fn summarize(&self, items: &[ReportItem]) -> Result<String, TransportError>;
}

/// `reqwest`-backed [`Backend`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    api_base: String,
    backend_base: String,
}

/// Join a base URL and an absolute path without doubling the slash.
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

fn mime_for(name: &str) -> &'static str {
    match crate::validate::extension_of(name).as_deref() {
        Some(".pdf") => "application/pdf",
        Some(".zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

fn network(err: impl std::fmt::Display) -> TransportError {
    TransportError::Network {
        detail: err.to_string(),
    }
}

fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("disclosure/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(network)?;
        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            backend_base: config.backend_base.clone(),
        })
    }

    async fn form(&self, file: &SelectedFile) -> Result<Form, TransportError> {
        let bytes = file.read().await.map_err(|e| {
            warn!(file = %file.name(), "could not read file: {e}");
            network(e)
        })?;
        let part = Part::bytes(bytes)
            .file_name(file.name().to_string())
            .mime_str(mime_for(file.name()))
            .map_err(network)?;
        Ok(Form::new().part("file", part))
    }

    /// Send a request and collect status plus raw body.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<(StatusCode, Vec<u8>), TransportError> {
        let response = request.send().await.map_err(|e| {
            warn!(%url, "request failed: {e}");
            network(e)
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!(%url, %status, "reading body failed: {e}");
            network(e)
        })?;
        debug!(%url, %status, bytes = body.len(), "response received");
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadResponse, TransportError> {
        let url = endpoint(&self.backend_base, "/api/upload");
        info!(%url, file = %file.name(), size = file.meta.size_bytes, "uploading");

        let form = self.form(file).await?;
        let (status, body) = self.send(self.client.post(&url).multipart(form), &url).await?;

        if !status.is_success() {
            let message = error_message(&body);
            warn!(%url, %status, ?message, "upload rejected");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            warn!(%url, "malformed upload response: {e}");
            TransportError::MalformedBody {
                detail: e.to_string(),
            }
        })
    }

    async fn analyze(
        &self,
        file: &SelectedFile,
        fast: bool,
    ) -> Result<AnalyzeResponse, TransportError> {
        let url = endpoint(&self.api_base, "/api/analyze");
        info!(%url, file = %file.name(), fast, "analyzing");

        let form = self.form(file).await?;
        let request = self
            .client
            .post(&url)
            .query(&[("fast", fast)])
            .multipart(form);
        let (status, body) = self.send(request, &url).await?;

        // The analyzer reports its own failures as `{ok: false, error}` with
        // any status, so the body is parsed before the status is checked.
        match serde_json::from_slice::<AnalyzeResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(TransportError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            }),
            Err(e) => {
                warn!(%url, "malformed analyze response: {e}");
                Err(TransportError::MalformedBody {
                    detail: e.to_string(),
                })
            }
        }
    }

    async fn summarize(&self, items: &[ReportItem]) -> Result<String, TransportError> {
        let url = endpoint(&self.api_base, "/api/summary");
        info!(%url, items = items.len(), "requesting summary");

        let (status, body) = self.send(self.client.post(&url).json(items), &url).await?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: SummaryResponse =
            serde_json::from_slice(&body).map_err(|e| TransportError::MalformedBody {
                detail: e.to_string(),
            })?;
        Ok(parsed.summary.unwrap_or_default())
    }
}
