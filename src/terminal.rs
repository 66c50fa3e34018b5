//! Terminal detection.
//!
//! This module decides whether escape sequences are safe to emit and
//! queries terminal dimensions. The decision is made once from a snapshot
//! of the environment ([`ColorEnv`]) and the TTY status of stdout, and is
//! then handed to the formatting code as a plain boolean.
//!
//! Environment variables, in order of precedence:
//!
//! - `MAKE_COLORS_FORCE` (truthy): always emit
//! - `NO_COLOR` (non-empty): never emit, see <https://no-color.org/>
//! - `MAKE_COLORS=0` (or `false`/`no`/`off`): never emit
//! - `FORCE_COLOR` (non-empty, not `0`): always emit
//! - `TERM=dumb` or `TERM=unknown`: never emit
//! - otherwise: emit when stdout is a terminal

use std::io::IsTerminal;

/// Snapshot of the environment variables that affect color output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorEnv {
    pub no_color: Option<String>,
    pub force_color: Option<String>,
    pub make_colors: Option<String>,
    pub make_colors_force: Option<String>,
    pub term: Option<String>,
}

impl ColorEnv {
    /// Read the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            no_color: std::env::var("NO_COLOR").ok(),
            force_color: std::env::var("FORCE_COLOR").ok(),
            make_colors: std::env::var("MAKE_COLORS").ok(),
            make_colors_force: std::env::var("MAKE_COLORS_FORCE").ok(),
            term: std::env::var("TERM").ok(),
        }
    }

    /// The decision the environment forces, if any.
    ///
    /// `Some(true)` forces color, `Some(false)` disables it and `None`
    /// leaves it to the TTY check.
    #[must_use]
    pub fn decision(&self) -> Option<bool> {
        if self.make_colors_force.as_deref().is_some_and(is_truthy) {
            return Some(true);
        }
        if self.no_color.as_deref().is_some_and(|value| !value.is_empty()) {
            return Some(false);
        }
        if self.make_colors.as_deref().is_some_and(is_falsy) {
            return Some(false);
        }
        if self.force_color.as_deref().is_some_and(is_truthy) {
            return Some(true);
        }
        if self.term.as_deref().is_some_and(is_dumb_term) {
            return Some(false);
        }
        None
    }
}

fn is_falsy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

fn is_truthy(value: &str) -> bool {
    !value.trim().is_empty() && !is_falsy(value)
}

fn is_dumb_term(term: &str) -> bool {
    let term = term.trim().to_ascii_lowercase();
    term == "dumb" || term == "unknown"
}

/// Decide color support for stdout from the current environment.
#[must_use]
pub fn detect_color_support() -> bool {
    detect_with(&ColorEnv::from_env(), std::io::stdout().is_terminal())
}

/// Decide color support from an environment snapshot and a TTY status.
#[must_use]
pub fn detect_with(env: &ColorEnv, is_tty: bool) -> bool {
    let decision = match env.decision() {
        Some(forced) => forced,
        None => is_tty && console_supports_ansi(),
    };
    log::debug!("color support: {decision} (tty: {is_tty})");
    decision
}

#[cfg(windows)]
fn console_supports_ansi() -> bool {
    crossterm::ansi_support::supports_ansi()
}

#[cfg(not(windows))]
fn console_supports_ansi() -> bool {
    true
}

/// Check if stdout is connected to a terminal.
#[must_use]
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Check if stderr is connected to a terminal.
#[must_use]
pub fn is_stderr_terminal() -> bool {
    std::io::stderr().is_terminal()
}

/// Get the terminal size (width, height) in cells.
///
/// Returns `None` if the terminal size cannot be determined.
#[must_use]
pub fn get_terminal_size() -> Option<(usize, usize)> {
    crossterm::terminal::size()
        .ok()
        .filter(|&(w, _)| w > 0)
        .map(|(w, h)| (usize::from(w), usize::from(h)))
}

/// Get the terminal width in cells.
///
/// Returns a default of 80 if the width cannot be determined.
#[must_use]
pub fn get_terminal_width() -> usize {
    get_terminal_size().map_or(80, |(w, _)| w)
}
