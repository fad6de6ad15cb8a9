//! Command-line interface.
//!
//! [`Cli`] is the clap definition; [`entrypoint::run`] dispatches it.

pub mod entrypoint;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::colors::ColorMode;

/// Which backend flow a file or saved response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlowKind {
    /// Batch upload (`.zip` by default)
    Upload,
    /// Single-disclosure analysis (`.pdf` by default)
    #[value(alias = "analyze")]
    Analysis,
}

#[derive(Parser, Debug)]
#[command(name = "disclosure")]
#[command(about = "Review mortgage Closing Disclosures against a review backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print the normalized result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write a self-contained HTML report
    #[arg(long, global = true, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Show point details for every file card
    #[arg(long, global = true)]
    pub details: bool,

    /// Colorize terminal output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Config file (default: .disclosure/config.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Analyzer service base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Upload service base URL
    #[arg(long, global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate and upload a batch, then show one card per file
    Upload {
        file: PathBuf,
        /// Expand the N-th card (1-based)
        #[arg(long, value_name = "N")]
        open: Option<usize>,
        /// Show details of the M-th point of the expanded card (1-based)
        #[arg(long, value_name = "M", requires = "open")]
        point: Option<usize>,
    },
    /// Analyze one Closing Disclosure PDF
    Analyze {
        file: PathBuf,
        /// Use the analyzer's full extraction path
        #[arg(long)]
        no_fast: bool,
        /// Skip the plain-language summary request
        #[arg(long)]
        no_summary: bool,
    },
    /// Check a file against the format and size rules without sending it
    Validate {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = FlowKind::Upload)]
        flow: FlowKind,
    },
    /// Render a saved backend response or JSON output without network I/O
    Render {
        input: PathBuf,
        #[arg(long, value_enum)]
        kind: FlowKind,
        /// Expand the N-th card (1-based, upload only)
        #[arg(long, value_name = "N")]
        open: Option<usize>,
        /// Show details of the M-th point of the expanded card (1-based)
        #[arg(long, value_name = "M", requires = "open")]
        point: Option<usize>,
    },
    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "disclosure",
            "analyze",
            "cd.pdf",
            "--no-summary",
            "--json",
            "--api-base",
            "http://localhost:9000",
        ])
        .expect("parse");
        assert!(cli.json);
        assert_eq!(cli.api_base.as_deref(), Some("http://localhost:9000"));
        match cli.command {
            Command::Analyze {
                no_summary, no_fast, ..
            } => {
                assert!(no_summary);
                assert!(!no_fast);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn point_needs_an_open_card() {
        let cli = Cli::try_parse_from([
            "disclosure", "upload", "b.zip", "--open", "2", "--point", "1",
        ])
        .expect("parse");
        assert!(matches!(
            cli.command,
            Command::Upload {
                open: Some(2),
                point: Some(1),
                ..
            }
        ));
        assert!(Cli::try_parse_from(["disclosure", "upload", "b.zip", "--point", "1"]).is_err());
    }

    #[test]
    fn flow_accepts_analyze_alias() {
        let cli = Cli::try_parse_from(["disclosure", "validate", "cd.pdf", "--flow", "analyze"])
            .expect("parse");
        assert!(matches!(
            cli.command,
            Command::Validate {
                flow: FlowKind::Analysis,
                ..
            }
        ));
    }
}
