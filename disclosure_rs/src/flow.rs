//! The two user flows, wired from validator to session.
//!
//! Upload: validate → send → normalize → display.
//! Analysis: validate → analyze → normalize → summarize → display.
//!
//! Validation failures never reach the backend. All failures end in the
//! session's error state and are returned so the caller can choose an exit
//! code.

use disclosure_report::types::{AnalysisView, FileRecord};
use tracing::{info, warn};

use crate::config::FileLimits;
use crate::error::{ANALYSIS_FAILED, FlowError, TransportError};
use crate::normalize::{UploadResult, normalize_analysis, normalize_upload};
use crate::session::Session;
use crate::transport::{Backend, SelectedFile};
use crate::validate::validate;

/// Shown in place of the summary when the summary request fails.
pub const SUMMARY_FAILED: &str = "Failed to generate summary.";

/// Analysis flow switches.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub limits: FileLimits,
    pub fast: bool,
    pub summarize: bool,
}

fn check(file: &SelectedFile, limits: &FileLimits) -> Result<(), FlowError> {
    validate(&file.meta, limits).map_err(|err| {
        info!(file = %file.name(), "rejected before upload: {err}");
        FlowError::from(err)
    })
}

/// Validate and upload one file, leaving the outcome in `session`.
pub async fn run_upload(
    backend: &dyn Backend,
    limits: &FileLimits,
    session: &mut Session<Vec<FileRecord>>,
    file: &SelectedFile,
) -> Result<Vec<FileRecord>, FlowError> {
    if let Err(err) = check(file, limits) {
        session.reject(err.to_string());
        return Err(err);
    }
    let ticket = session.begin(file.name())?;

    let outcome = match backend.upload(file).await {
        Ok(response) => match normalize_upload(response) {
            UploadResult::Files(files) => Ok(files),
            UploadResult::Failed(message) => Err(FlowError::Application(message)),
        },
        Err(err) => Err(FlowError::Transport(err)),
    };

    match &outcome {
        Ok(files) => info!(files = files.len(), "upload complete"),
        Err(err) => warn!("upload failed: {err}"),
    }
    session.complete(
        ticket,
        outcome.as_ref().cloned().map_err(ToString::to_string),
    );
    outcome
}

/// Analyzer transport failures are shown with the analyzer's wording.
fn analysis_transport_error(err: TransportError) -> FlowError {
    warn!("analysis request failed: {err:?}");
    match err {
        TransportError::Status {
            message: Some(message),
            ..
        } => FlowError::Application(message),
        _ => FlowError::Application(ANALYSIS_FAILED.to_string()),
    }
}

/// Validate, analyze, and summarize one disclosure.
///
/// A failed summary does not fail the analysis; the summary text says so
/// instead.
pub async fn run_analysis(
    backend: &dyn Backend,
    options: &AnalysisOptions,
    session: &mut Session<AnalysisView>,
    file: &SelectedFile,
) -> Result<AnalysisView, FlowError> {
    if let Err(err) = check(file, &options.limits) {
        session.reject(err.to_string());
        return Err(err);
    }
    let ticket = session.begin(file.name())?;

    let outcome = match backend.analyze(file, options.fast).await {
        Ok(response) => normalize_analysis(response),
        Err(err) => Err(analysis_transport_error(err)),
    };

    let outcome = match outcome {
        Ok(mut view) if options.summarize => {
            view.summary = Some(match backend.summarize(&view.report.items).await {
                Ok(text) => text,
                Err(err) => {
                    warn!("summary request failed: {err:?}");
                    SUMMARY_FAILED.to_string()
                }
            });
            Ok(view)
        }
        other => other,
    };

    match &outcome {
        Ok(view) => info!(
            verdict = %view.report.verdict,
            items = view.report.items.len(),
            "analysis complete"
        ),
        Err(err) => warn!("analysis failed: {err}"),
    }
    session.complete(
        ticket,
        outcome.as_ref().cloned().map_err(ToString::to_string),
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AnalyzeResponse, UploadResponse};
    use crate::session::Phase;
    use async_trait::async_trait;
    use disclosure_report::types::{Report, ReportItem, Status};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted backend that counts calls.
    struct FakeBackend {
        upload: Mutex<Option<Result<UploadResponse, TransportError>>>,
        analyze: Mutex<Option<Result<AnalyzeResponse, TransportError>>>,
        summary: Result<String, TransportError>,
        calls: AtomicUsize,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                upload: Mutex::new(None),
                analyze: Mutex::new(None),
                summary: Ok(String::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn with_upload(self, r: Result<UploadResponse, TransportError>) -> Self {
            *self.upload.lock().unwrap() = Some(r);
            self
        }

        fn with_analyze(self, r: Result<AnalyzeResponse, TransportError>) -> Self {
            *self.analyze.lock().unwrap() = Some(r);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Backend for FakeBackend {
        async fn upload(&self, _file: &SelectedFile) -> Result<UploadResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.upload.lock().unwrap().take().expect("scripted upload")
        }

        async fn analyze(
            &self,
            _file: &SelectedFile,
            _fast: bool,
        ) -> Result<AnalyzeResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.analyze.lock().unwrap().take().expect("scripted analyze")
        }

        async fn summarize(&self, _items: &[ReportItem]) -> Result<String, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.summary.clone()
        }
    }

    fn zip_limits() -> FileLimits {
        FileLimits::upload_defaults()
    }

    fn analysis_options(summarize: bool) -> AnalysisOptions {
        AnalysisOptions {
            limits: FileLimits::analyze_defaults(),
            fast: true,
            summarize,
        }
    }

    fn uploaded(body: &str) -> UploadResponse {
        serde_json::from_str(body).expect("valid json")
    }

    #[tokio::test]
    async fn validation_failure_sends_nothing() {
        let backend = FakeBackend::new();
        let mut session = Session::new();
        let file = SelectedFile::in_memory("scan.png", vec![0; 16]);

        let err = run_upload(&backend, &zip_limits(), &mut session, &file)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Please upload .zip files only");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(backend.calls(), 0);
        assert_eq!(session.error(), Some("Please upload .zip files only"));
    }

    #[tokio::test]
    async fn upload_success_shows_one_card_per_file() {
        let backend = FakeBackend::new().with_upload(Ok(uploaded(
            r#"{"success": true, "files": [
                {"file_name": "cd.pdf", "points": [{"title": "t", "summary": "s", "details": "d"}]},
                {"file_name": "cd.pdf"},
                {"file_name": "le.pdf", "title": "Loan Estimate"}
            ]}"#,
        )));
        let mut session = Session::new();
        let file = SelectedFile::in_memory("batch.zip", vec![1, 2, 3]);

        let files = run_upload(&backend, &zip_limits(), &mut session, &file)
            .await
            .expect("upload");

        assert_eq!(backend.calls(), 1);
        assert_eq!(files.len(), 3);
        assert!(!files[0].points[0].is_red_flag);
        assert_eq!(session.result().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn backend_error_is_shown_verbatim() {
        let backend = FakeBackend::new().with_upload(Ok(uploaded(
            r#"{"success": false, "error": "No PDFs found in archive"}"#,
        )));
        let mut session = Session::new();
        let file = SelectedFile::in_memory("batch.zip", vec![1]);

        let err = run_upload(&backend, &zip_limits(), &mut session, &file)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No PDFs found in archive");
        assert_eq!(session.error(), Some("No PDFs found in archive"));
        assert!(session.input_enabled());
    }

    #[tokio::test]
    async fn transport_failure_lands_in_idle_error() {
        let backend = FakeBackend::new().with_upload(Err(TransportError::Status {
            status: 500,
            message: None,
        }));
        let mut session = Session::new();
        let file = SelectedFile::in_memory("batch.zip", vec![1]);

        let err = run_upload(&backend, &zip_limits(), &mut session, &file)
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(matches!(session.phase(), Phase::Idle { error: Some(e) } if e == "Upload failed with status: 500"));
    }

    #[tokio::test]
    async fn analysis_attaches_summary() {
        let mut backend = FakeBackend::new().with_analyze(Ok(AnalyzeResponse {
            ok: true,
            report: Some(Report {
                verdict: Status::Pass,
                items: vec![],
            }),
            ..Default::default()
        }));
        backend.summary = Ok("Everything checks out.".into());
        let mut session = Session::new();
        let file = SelectedFile::in_memory("cd.pdf", vec![1]);

        let view = run_analysis(&backend, &analysis_options(true), &mut session, &file)
            .await
            .expect("analysis");
        assert_eq!(view.summary.as_deref(), Some("Everything checks out."));
        assert_eq!(backend.calls(), 2);
        assert_eq!(session.result().map(|v| &v.report.verdict), Some(&Status::Pass));
    }

    #[tokio::test]
    async fn failed_summary_keeps_the_analysis() {
        let mut backend = FakeBackend::new().with_analyze(Ok(AnalyzeResponse {
            ok: true,
            ..Default::default()
        }));
        backend.summary = Err(TransportError::Network {
            detail: "refused".into(),
        });
        let mut session = Session::new();
        let file = SelectedFile::in_memory("cd.pdf", vec![1]);

        let view = run_analysis(&backend, &analysis_options(true), &mut session, &file)
            .await
            .expect("analysis");
        assert_eq!(view.summary.as_deref(), Some(SUMMARY_FAILED));
    }

    #[tokio::test]
    async fn summary_can_be_skipped() {
        let backend = FakeBackend::new().with_analyze(Ok(AnalyzeResponse {
            ok: true,
            ..Default::default()
        }));
        let mut session = Session::new();
        let file = SelectedFile::in_memory("cd.pdf", vec![1]);

        let view = run_analysis(&backend, &analysis_options(false), &mut session, &file)
            .await
            .expect("analysis");
        assert_eq!(view.summary, None);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn analysis_application_and_transport_errors() {
        let backend = FakeBackend::new().with_analyze(Ok(AnalyzeResponse {
            ok: false,
            error: Some("Could not read PDF".into()),
            ..Default::default()
        }));
        let mut session = Session::new();
        let file = SelectedFile::in_memory("cd.pdf", vec![1]);
        let err = run_analysis(&backend, &analysis_options(true), &mut session, &file)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Could not read PDF");
        assert_eq!(backend.calls(), 1);

        let backend = FakeBackend::new().with_analyze(Err(TransportError::Network {
            detail: "refused".into(),
        }));
        let mut session = Session::new();
        let err = run_analysis(&backend, &analysis_options(true), &mut session, &file)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Analysis failed");
        assert_eq!(session.error(), Some("Analysis failed"));
    }

    #[tokio::test]
    async fn analysis_rejects_zip() {
        let backend = FakeBackend::new();
        let mut session = Session::new();
        let file = SelectedFile::in_memory("batch.zip", vec![1]);
        let err = run_analysis(&backend, &analysis_options(true), &mut session, &file)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please upload .pdf files only");
        assert_eq!(backend.calls(), 0);
    }
}
