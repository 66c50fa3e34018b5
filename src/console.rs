//! Console - the formatting entry points.
//!
//! A [`Console`] holds the color decision made once at startup (from the
//! environment and TTY status, or set explicitly through
//! [`ConsoleBuilder`]) and passes it to the style, markup and table code on
//! every call. Nothing else about a console changes after it is built.
//!
//! ```
//! use make_colors::console::Console;
//!
//! let console = Console::builder().color(true).build();
//! assert_eq!(console.format("Error", "red", None, &[], false), "\x1b[31mError\x1b[0m");
//! assert_eq!(console.format_spec("ok", "bold-green", false), "\x1b[1;32mok\x1b[0m");
//! assert_eq!(console.colorize("[blue]i[/] info", None, false), "\x1b[34mi\x1b[0m info");
//!
//! let plain = Console::builder().no_color().build();
//! assert_eq!(plain.format("Error", "red", None, &[], false), "Error");
//! assert_eq!(plain.format("Error", "red", None, &[], true), "\x1b[31mError\x1b[0m");
//! ```

use std::io::{self, Write};
use std::sync::LazyLock;

use crate::markup;
use crate::renderables::table::Table;
use crate::style::{self, ColorSpec};
use crate::terminal;

/// Immutable formatting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Console {
    /// Emit escape sequences.
    color: bool,
    /// Render markup in `colorize` and `print`.
    markup: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// Create a console with color support detected from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            color: terminal::detect_color_support(),
            markup: true,
        }
    }

    /// Create a console builder for custom configuration.
    #[must_use]
    pub fn builder() -> ConsoleBuilder {
        ConsoleBuilder::default()
    }

    /// Check if escape sequences are emitted.
    #[must_use]
    pub const fn is_color_enabled(&self) -> bool {
        self.color
    }

    /// Check if markup is rendered.
    #[must_use]
    pub const fn is_markup_enabled(&self) -> bool {
        self.markup
    }

    /// Get the terminal width.
    #[must_use]
    pub fn width(&self) -> usize {
        terminal::get_terminal_width()
    }

    const fn emit(&self, force: bool) -> bool {
        force || self.color
    }

    /// Format text with explicit foreground, background and attributes.
    ///
    /// Color names may be full names or abbreviations; unknown names fall
    /// back to white. `force` emits escape sequences even when color is
    /// disabled.
    #[must_use]
    pub fn format(
        &self,
        text: &str,
        foreground: &str,
        background: Option<&str>,
        attrs: &[&str],
        force: bool,
    ) -> String {
        let spec = style::parse(None, Some(foreground), background, attrs);
        spec.render(text, self.emit(force))
    }

    /// Format text with a combined spec string such as `"bold-red-yellow"`.
    #[must_use]
    pub fn format_spec(&self, text: &str, spec: &str, force: bool) -> String {
        ColorSpec::parse(spec).render(text, self.emit(force))
    }

    /// Format text, rendering markup if it contains any.
    ///
    /// Text without markup is formatted with `spec`, or the default
    /// foreground when no spec is given.
    #[must_use]
    pub fn colorize(&self, text: &str, spec: Option<&str>, force: bool) -> String {
        let emit = self.emit(force);
        if self.markup && markup::has_markup(text) {
            return markup::render_markup(text, emit);
        }
        spec.map_or_else(ColorSpec::default, ColorSpec::parse)
            .render(text, emit)
    }

    /// Render a table with this console's color setting.
    #[must_use]
    pub fn render_table(&self, table: &Table) -> String {
        table.draw_with(self.color)
    }

    /// Print text followed by a newline to stdout, rendering markup.
    ///
    /// Errors writing to stdout are ignored.
    pub fn print(&self, content: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(err) = self.print_to(&mut stdout, content) {
            log::debug!("failed to write to stdout: {err}");
        }
    }

    /// Print text followed by a newline to a writer, rendering markup.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn print_to<W: Write>(&self, writer: &mut W, content: &str) -> io::Result<()> {
        let text = if self.markup {
            markup::render_markup(content, self.color)
        } else {
            content.to_string()
        };
        writeln!(writer, "{text}")?;
        writer.flush()
    }
}

/// Builder for creating a Console with custom settings.
#[derive(Debug, Default)]
pub struct ConsoleBuilder {
    color: Option<bool>,
    markup: Option<bool>,
}

impl ConsoleBuilder {
    /// Set whether escape sequences are emitted, skipping detection.
    #[must_use]
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = Some(enabled);
        self
    }

    /// Always emit escape sequences.
    #[must_use]
    pub fn force_color(self) -> Self {
        self.color(true)
    }

    /// Never emit escape sequences.
    #[must_use]
    pub fn no_color(self) -> Self {
        self.color(false)
    }

    /// Enable/disable markup rendering.
    #[must_use]
    pub fn markup(mut self, enabled: bool) -> Self {
        self.markup = Some(enabled);
        self
    }

    /// Build the console.
    #[must_use]
    pub fn build(self) -> Console {
        Console {
            color: self.color.unwrap_or_else(terminal::detect_color_support),
            markup: self.markup.unwrap_or(true),
        }
    }
}

static DEFAULT_CONSOLE: LazyLock<Console> = LazyLock::new(Console::new);

/// The process-wide console, detected on first use.
#[must_use]
pub fn default_console() -> &'static Console {
    &DEFAULT_CONSOLE
}

/// Format text with a combined spec string using the default console.
#[must_use]
pub fn make_colors(text: &str, spec: &str) -> String {
    default_console().format_spec(text, spec, false)
}

/// Format text, rendering markup if present, using the default console.
#[must_use]
pub fn colorize(text: &str, spec: Option<&str>) -> String {
    default_console().colorize(text, spec, false)
}
