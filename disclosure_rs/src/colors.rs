//! Terminal styling.
//!
//! Colors are keyed by [`Tone`], the palette the HTML badges use, so a red
//! badge in the report is a red badge in the terminal.

use std::io::IsTerminal;

use clap::ValueEnum;
use disclosure_report::format::Tone;

const BOLD: &str = "\x1b[1m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

fn sgr(tone: Tone) -> &'static str {
    match tone {
        Tone::Green => "\x1b[32m",
        Tone::Amber => "\x1b[33m",
        Tone::Red => "\x1b[31m",
        Tone::Blue => "\x1b[34m",
        Tone::Grey => "\x1b[2m",
    }
}

/// `--color` setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `Auto` colors only an interactive stdout, and never under `NO_COLOR`.
    pub fn resolve(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }
}

/// Applies ANSI styling, or passes text through when color is off.
/// `Copy`, so render functions take it by value.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            color: mode.resolve(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn tone(&self, text: &str, tone: Tone) -> String {
        self.paint(text, sgr(tone))
    }

    /// Red flags and failures.
    pub fn flag(&self, text: &str) -> String {
        self.tone(text, Tone::Red)
    }

    pub fn caution(&self, text: &str) -> String {
        self.tone(text, Tone::Amber)
    }

    pub fn good(&self, text: &str) -> String {
        self.tone(text, Tone::Green)
    }

    pub fn muted(&self, text: &str) -> String {
        self.tone(text, Tone::Grey)
    }

    pub fn file(&self, text: &str) -> String {
        self.paint(text, CYAN)
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(text, BOLD)
    }

    /// `[LABEL]`, bold and in the tone's color.
    pub fn badge(&self, label: &str, tone: Tone) -> String {
        let text = format!("[{label}]");
        if self.color {
            format!("{BOLD}{}{text}{RESET}", sgr(tone))
        } else {
            text
        }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_owned();
        }
        format!("{code}{text}{RESET}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_painter_passes_text_through() {
        let p = Painter::plain();
        assert_eq!(p.flag("2 red flags"), "2 red flags");
        assert_eq!(p.file("cd.pdf"), "cd.pdf");
        assert_eq!(p.badge("All Good", Tone::Green), "[All Good]");
    }

    #[test]
    fn colored_painter_follows_badge_tones() {
        let p = Painter::new(ColorMode::Always);
        assert_eq!(p.flag("x"), "\x1b[31mx\x1b[0m");
        assert_eq!(p.caution("x"), p.tone("x", Tone::Amber));
        assert_eq!(p.muted("x"), "\x1b[2mx\x1b[0m");
        assert_eq!(p.badge("INFO", Tone::Blue), "\x1b[1m\x1b[34m[INFO]\x1b[0m");
    }

    #[test]
    fn explicit_modes_ignore_the_terminal() {
        assert!(ColorMode::Always.resolve());
        assert!(!ColorMode::Never.resolve());
    }
}
