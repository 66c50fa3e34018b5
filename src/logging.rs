//! Colored output for the `log` crate.
//!
//! [`ColorLogger`] writes one line per record: an optional timestamp, the
//! level name colored by severity, and the message. Messages may use markup
//! when [`ColorLogger::markup`] is enabled.
//!
//! ```no_run
//! use log::LevelFilter;
//! use make_colors::logging::ColorLogger;
//!
//! ColorLogger::new()
//!     .level(LevelFilter::Debug)
//!     .markup(true)
//!     .init()
//!     .expect("logger already installed");
//! log::info!("[green]ready[/]");
//! ```

use std::cell::Cell;
use std::io::{self, Write};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::{OffsetDateTime, format_description::OwnedFormatItem};

use crate::markup;
use crate::style::ColorSpec;
use crate::sync::lock_recover;
use crate::terminal::{self, ColorEnv};

thread_local! {
    /// Set while this thread is writing a record.
    static WRITING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as writing a record until dropped.
///
/// Rendering a message can log diagnostics of its own (unknown colors,
/// unterminated markup). Those nested records are dropped.
struct WriteGuard;

impl WriteGuard {
    fn enter() -> Option<Self> {
        if WRITING.with(|writing| writing.replace(true)) {
            None
        } else {
            Some(Self)
        }
    }
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        WRITING.with(|writing| writing.set(false));
    }
}

/// Logger for the `log` crate that colors level names.
///
/// # Thread Safety
///
/// All mutable state sits behind mutexes with poison recovery, so records
/// from several threads are written whole, one line at a time.
pub struct ColorLogger {
    level: LevelFilter,
    show_time: bool,
    omit_repeated_times: bool,
    show_level: bool,
    show_target: bool,
    markup: bool,
    color: bool,
    time_format: OwnedFormatItem,
    last_time: Mutex<Option<String>>,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Default for ColorLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorLogger {
    /// Create a logger writing to stderr, colored if stderr supports it.
    #[must_use]
    pub fn new() -> Self {
        let time_format = time::format_description::parse_owned::<2>("[hour]:[minute]:[second]")
            .unwrap_or_else(|_| OwnedFormatItem::Compound(Box::new([])));
        Self {
            level: LevelFilter::Info,
            show_time: true,
            omit_repeated_times: false,
            show_level: true,
            show_target: false,
            markup: false,
            color: terminal::detect_with(&ColorEnv::from_env(), terminal::is_stderr_terminal()),
            time_format,
            last_time: Mutex::new(None),
            writer: Mutex::new(Box::new(io::stderr())),
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Blank out a timestamp equal to the previous one.
    #[must_use]
    pub fn omit_repeated_times(mut self, omit: bool) -> Self {
        self.omit_repeated_times = omit;
        self
    }

    /// Enable or disable level names.
    #[must_use]
    pub fn show_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Append the record target to each line.
    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Enable markup rendering for messages.
    #[must_use]
    pub fn markup(mut self, markup: bool) -> Self {
        self.markup = markup;
        self
    }

    /// Set whether escape sequences are emitted.
    #[must_use]
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Override the time format (`time` format description syntax).
    ///
    /// An invalid description keeps the current format.
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        match time::format_description::parse_owned::<2>(format) {
            Ok(parsed) => self.time_format = parsed,
            Err(err) => log::debug!("ignoring time format {format:?}: {err}"),
        }
        self
    }

    /// Write to `writer` instead of stderr.
    #[must_use]
    pub fn writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Mutex::new(Box::new(writer));
        self
    }

    /// Install as the global logger.
    ///
    /// # Errors
    ///
    /// Fails if a logger is already installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format)
            .unwrap_or_else(|_| now.to_string())
    }

    fn level_spec(level: Level) -> ColorSpec {
        match level {
            Level::Trace => ColorSpec::parse("dim"),
            Level::Debug => ColorSpec::parse("dim-blue"),
            Level::Info => ColorSpec::parse("green"),
            Level::Warn => ColorSpec::parse("yellow"),
            Level::Error => ColorSpec::parse("bold-red"),
        }
    }

    fn format_record(&self, record: &Record<'_>) -> String {
        let mut line = String::new();

        if self.show_time {
            let time_str = self.format_time();
            let display = if self.omit_repeated_times {
                let mut last = lock_recover(&self.last_time);
                if last.as_ref() == Some(&time_str) {
                    " ".repeat(time_str.len())
                } else {
                    *last = Some(time_str.clone());
                    time_str
                }
            } else {
                time_str
            };
            line.push_str(&display);
            line.push(' ');
        }

        if self.show_level {
            let padded = format!("{:<5}", record.level());
            line.push_str(&Self::level_spec(record.level()).render(&padded, self.color));
            line.push(' ');
        }

        let message = record.args().to_string();
        if self.markup {
            line.push_str(&markup::render_markup(&message, self.color));
        } else {
            line.push_str(&message);
        }

        if self.show_target {
            line.push(' ');
            let target = format!("({})", record.target());
            line.push_str(&ColorSpec::parse("lightblack").render(&target, self.color));
        }

        line
    }
}

impl Log for ColorLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(_guard) = WriteGuard::enter() else {
            return;
        };

        let line = self.format_record(record);
        let mut writer = lock_recover(&self.writer);
        // Nowhere left to report a failed log write.
        let _ = writeln!(writer, "{line}");
    }

    fn flush(&self) {
        let _ = lock_recover(&self.writer).flush();
    }
}
