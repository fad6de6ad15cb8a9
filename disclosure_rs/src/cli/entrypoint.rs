//! CLI dispatch: configuration, logging, flows, and output surfaces.
//!
//! Exit codes: 0 success, 1 transport or application failure, 2 validation
//! or configuration failure.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use disclosure_report::types::{AnalysisView, FileRecord};
use disclosure_report::{render_analysis_report, render_error_report, render_upload_report};
use tracing::debug;

use crate::api::{AnalyzeResponse, UploadResponse};
use crate::cli::{Cli, Command, FlowKind};
use crate::colors::Painter;
use crate::config::{AppConfig, ConfigOverrides};
use crate::error::{ANALYSIS_FAILED, FlowError};
use crate::flow::{AnalysisOptions, run_analysis, run_upload};
use crate::normalize::{UploadResult, normalize_analysis, normalize_upload};
use crate::output::{
    AnalysisEnvelope, CardOptions, UploadEnvelope, render_analysis, render_file_cards, to_json,
    write_html,
};
use crate::progress::{self, CAPTION_PERIOD, LOADING_STAGES, Spinner, format_duration};
use crate::session::Session;
use crate::transport::{HttpBackend, SelectedFile};
use crate::validate::{FileMeta, validate};

const EXIT_OK: u8 = 0;
const EXIT_FAILED: u8 = 1;
const EXIT_USAGE: u8 = 2;

/// Install the stderr subscriber. `RUST_LOG` wins over `--log-level`.
pub fn init_tracing(log_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.parse().unwrap_or_default()),
        )
        .try_init();
}

/// Output switches shared by every command.
struct Surface {
    json: bool,
    html: Option<PathBuf>,
    details: bool,
    painter: Painter,
}

impl Surface {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            html: cli.html.clone(),
            details: cli.details,
            painter: Painter::new(cli.color),
        }
    }

    /// Spinner only when a human is watching stderr.
    fn spinner(&self) -> Spinner {
        if self.json || !std::io::stderr().is_terminal() {
            Spinner::hidden()
        } else {
            Spinner::with_captions(LOADING_STAGES, CAPTION_PERIOD)
        }
    }

    fn write_html(&self, html: impl FnOnce() -> String) -> Result<()> {
        if let Some(path) = &self.html {
            write_html(path, &html())
                .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
            if !self.json {
                eprintln!("HTML report written to {}", self.painter.file(&path.display().to_string()));
            }
        }
        Ok(())
    }
}

/// Run the CLI. This is the whole `main()` body.
pub async fn run(cli: Cli) -> ExitCode {
    init_tracing(&cli.log_level);
    let surface = Surface::from_cli(&cli);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            progress::error(&format!("{err:#}"));
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let code = match dispatch(cli.command, &config, &surface).await {
        Ok(code) => code,
        Err(err) => {
            progress::error(&format!("{err:#}"));
            EXIT_FAILED
        }
    };
    ExitCode::from(code)
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let overrides = ConfigOverrides {
        api_base: cli.api_base.clone(),
        backend_base: cli.backend_url.clone(),
        fast_mode: match &cli.command {
            Command::Analyze { no_fast: true, .. } => Some(false),
            _ => None,
        },
    };
    let config = AppConfig::resolve(
        &root,
        cli.config.as_deref(),
        |key| std::env::var(key).ok(),
        &overrides,
    )?;
    Ok(config)
}

async fn dispatch(command: Command, config: &AppConfig, surface: &Surface) -> Result<u8> {
    match command {
        Command::Upload { file, open, point } => upload(&file, (open, point), config, surface).await,
        Command::Analyze {
            file, no_summary, ..
        } => analyze(&file, !no_summary, config, surface).await,
        Command::Validate { file, flow } => validate_only(&file, flow, config, surface),
        Command::Render {
            input,
            kind,
            open,
            point,
        } => render(&input, kind, (open, point), surface),
        Command::Config => show_config(config, surface),
    }
}

/// Stat the selected file. A missing file is a usage error.
/// Failures always go to stderr so `--json` stdout stays parseable.
fn select(path: &Path) -> Option<SelectedFile> {
    match SelectedFile::from_path(path) {
        Ok(file) => Some(file),
        Err(err) => {
            progress::error(&format!("cannot read {}: {err}", path.display()));
            None
        }
    }
}

/// `--open N` and `--point M`, both 1-based.
type Opened = (Option<usize>, Option<usize>);

fn expand<R>(session: &mut Session<R>, (open, point): Opened) {
    let Some(n) = open.filter(|n| *n > 0) else {
        return;
    };
    let expansion = session.expansion_mut();
    expansion.toggle_file(n - 1);
    if let Some(m) = point.filter(|m| *m > 0) {
        expansion.toggle_point(m - 1);
    }
}

async fn upload(path: &Path, open: Opened, config: &AppConfig, surface: &Surface) -> Result<u8> {
    let Some(file) = select(path) else {
        return Ok(EXIT_USAGE);
    };
    let backend = HttpBackend::new(config)?;
    let mut session = Session::new();

    let started = Instant::now();
    let spinner = surface.spinner();
    let outcome = run_upload(&backend, &config.upload, &mut session, &file).await;
    match &outcome {
        Ok(files) => spinner.finish_success(&format!(
            "{} processed {} in {}",
            file.name(),
            progress::format_count(files.len(), "file", "files"),
            format_duration(started.elapsed())
        )),
        Err(_) => spinner.finish_clear(),
    }

    expand(&mut session, open);
    present_upload(outcome, &session, file.name(), surface)
}

fn present_upload(
    outcome: Result<Vec<FileRecord>, FlowError>,
    session: &Session<Vec<FileRecord>>,
    source: &str,
    surface: &Surface,
) -> Result<u8> {
    let (result, code) = match outcome {
        Ok(files) => (UploadResult::Files(files), EXIT_OK),
        Err(err) => (UploadResult::Failed(err.to_string()), err.exit_code()),
    };

    if surface.json {
        println!("{}", to_json(&UploadEnvelope::from(&result))?);
    } else {
        match &result {
            UploadResult::Files(files) => print!(
                "{}",
                render_file_cards(
                    files,
                    session.expansion(),
                    CardOptions {
                        all_details: surface.details
                    },
                    surface.painter
                )
            ),
            UploadResult::Failed(message) => progress::error(message),
        }
    }

    surface.write_html(|| match &result {
        UploadResult::Files(files) => render_upload_report(files, source),
        UploadResult::Failed(message) => render_error_report("Upload", message),
    })?;
    Ok(code)
}

async fn analyze(path: &Path, summarize: bool, config: &AppConfig, surface: &Surface) -> Result<u8> {
    let Some(file) = select(path) else {
        return Ok(EXIT_USAGE);
    };
    let backend = HttpBackend::new(config)?;
    let mut session = Session::new();
    let options = AnalysisOptions {
        limits: config.analyze.clone(),
        fast: config.fast_mode,
        summarize,
    };

    let started = Instant::now();
    let spinner = surface.spinner();
    let outcome = run_analysis(&backend, &options, &mut session, &file).await;
    match &outcome {
        Ok(_) => spinner.finish_success(&format!(
            "{} analyzed in {}",
            file.name(),
            format_duration(started.elapsed())
        )),
        Err(_) => spinner.finish_clear(),
    }
    present_analysis(outcome, file.name(), surface)
}

fn present_analysis(
    outcome: Result<AnalysisView, FlowError>,
    source: &str,
    surface: &Surface,
) -> Result<u8> {
    let code = match &outcome {
        Ok(_) => EXIT_OK,
        Err(err) => err.exit_code(),
    };

    if surface.json {
        println!("{}", to_json(&AnalysisEnvelope::from_outcome(&outcome))?);
    } else {
        match &outcome {
            Ok(view) => print!("{}", render_analysis(view, surface.painter)),
            Err(err) => progress::error(&err.to_string()),
        }
    }

    surface.write_html(|| match &outcome {
        Ok(view) => render_analysis_report(view, source),
        Err(err) => render_error_report("Analysis", &err.to_string()),
    })?;
    Ok(code)
}

fn validate_only(path: &Path, flow: FlowKind, config: &AppConfig, surface: &Surface) -> Result<u8> {
    let meta = match FileMeta::from_path(path) {
        Ok(meta) => meta,
        Err(err) => {
            progress::error(&format!("cannot read {}: {err}", path.display()));
            return Ok(EXIT_USAGE);
        }
    };
    let limits = match flow {
        FlowKind::Upload => &config.upload,
        FlowKind::Analysis => &config.analyze,
    };
    let verdict = validate(&meta, limits);

    if surface.json {
        let value = serde_json::json!({
            "file": meta.name,
            "size_bytes": meta.size_bytes,
            "valid": verdict.is_ok(),
            "error": verdict.as_ref().err().map(ToString::to_string),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match &verdict {
            Ok(()) => println!(
                "{} {} is ready to send",
                surface.painter.good("✓"),
                surface.painter.file(&meta.name)
            ),
            Err(err) => progress::error(&err.to_string()),
        }
    }
    Ok(if verdict.is_ok() { EXIT_OK } else { EXIT_USAGE })
}

/// Parse a saved analysis: either our JSON envelope or a raw backend body.
fn parse_saved_analysis(raw: &str) -> Result<Result<AnalysisView, FlowError>> {
    let value: serde_json::Value = serde_json::from_str(raw).context("input is not valid JSON")?;
    if value.get("schema_version").is_some() {
        let envelope: AnalysisEnvelope =
            serde_json::from_value(value).context("input is not a saved analysis")?;
        return Ok(match (envelope.ok, envelope.analysis) {
            (true, Some(view)) => Ok(view),
            _ => Err(FlowError::Application(
                envelope.error.unwrap_or_else(|| ANALYSIS_FAILED.to_string()),
            )),
        });
    }
    let response: AnalyzeResponse =
        serde_json::from_value(value).context("input is not an analyzer response")?;
    Ok(normalize_analysis(response))
}

fn render(input: &Path, kind: FlowKind, open: Opened, surface: &Surface) -> Result<u8> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("cannot read {}", input.display()))?;
    let source = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!(input = %input.display(), ?kind, "rendering saved response");

    match kind {
        FlowKind::Upload => {
            let response: UploadResponse =
                serde_json::from_str(&raw).context("input is not an upload response")?;
            let outcome = match normalize_upload(response) {
                UploadResult::Files(files) => Ok(files),
                UploadResult::Failed(message) => Err(FlowError::Application(message)),
            };
            let mut session = Session::new();
            if let Ok(files) = &outcome {
                let ticket = session.begin(source.clone())?;
                session.complete(ticket, Ok(files.clone()));
                expand(&mut session, open);
            }
            present_upload(outcome, &session, &source, surface)
        }
        FlowKind::Analysis => {
            let outcome = parse_saved_analysis(&raw)?;
            present_analysis(outcome, &source, surface)
        }
    }
}

fn show_config(config: &AppConfig, surface: &Surface) -> Result<u8> {
    if surface.json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", toml::to_string_pretty(config)?);
    }
    if config.identity.publishable_key.is_none() && !config.identity.required && !surface.json {
        eprintln!("{}", surface.painter.muted("identity: disabled (no publishable key)"));
    }
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_envelope_and_raw_response_both_parse() {
        let envelope = r#"{"schema_version": 1, "ok": true, "analysis": {
            "facts": {}, "confidence_notes": [], "report": {"verdict": "PASS", "items": []}
        }}"#;
        let view = parse_saved_analysis(envelope).expect("json").expect("ok");
        assert!(view.report.items.is_empty());

        let raw = r#"{"ok": true, "report": {"verdict": "FAIL", "items": []}}"#;
        let view = parse_saved_analysis(raw).expect("json").expect("ok");
        assert_eq!(view.report.verdict.as_str(), "FAIL");

        let failed = r#"{"schema_version": 1, "ok": false, "error": "Could not read PDF"}"#;
        let err = parse_saved_analysis(failed).expect("json").unwrap_err();
        assert_eq!(err.to_string(), "Could not read PDF");

        assert!(parse_saved_analysis("not json").is_err());
    }
}
