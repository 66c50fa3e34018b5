//! Color registry for terminal rendering.
//!
//! This module maps human-friendly color names and their abbreviations to
//! the 16 standard ANSI colors and their SGR parameter numbers.
//!
//! # Examples
//!
//! ## Parsing Colors
//!
//! ```
//! use make_colors::color::Color;
//!
//! // Full names
//! assert_eq!(Color::parse("red"), Some(Color::Red));
//! assert_eq!(Color::parse("lightblue"), Some(Color::LightBlue));
//!
//! // Abbreviations
//! assert_eq!(Color::parse("bl"), Some(Color::Blue));
//! assert_eq!(Color::parse("lr"), Some(Color::LightRed));
//!
//! // Unknown names are rejected by the strict lookup...
//! assert_eq!(Color::parse("chartreuse"), None);
//! ```
//!
//! ## Lenient Resolution
//!
//! ```
//! use make_colors::color::{resolve_name, Color, DEFAULT_FOREGROUND};
//!
//! // ...and fall back to the default color through the lenient one.
//! assert_eq!(resolve_name("chartreuse"), DEFAULT_FOREGROUND);
//! assert_eq!(resolve_name("y"), Color::Yellow);
//! ```
//!
//! ## ANSI Code Generation
//!
//! ```
//! use make_colors::color::Color;
//!
//! assert_eq!(Color::Red.fg_code(), 31);
//! assert_eq!(Color::Red.bg_code(), 41);
//! assert_eq!(Color::LightCyan.fg_code(), 96);
//! assert_eq!(Color::LightCyan.bg_code(), 106);
//! ```

use std::fmt;
use std::str::FromStr;

/// Color used when a foreground cannot be resolved.
pub const DEFAULT_FOREGROUND: Color = Color::White;

/// One of the 16 standard ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    LightBlack = 8,
    LightRed = 9,
    LightGreen = 10,
    LightYellow = 11,
    LightBlue = 12,
    LightMagenta = 13,
    LightCyan = 14,
    LightWhite = 15,
}

impl Color {
    /// All colors in ANSI number order.
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::LightBlack,
        Self::LightRed,
        Self::LightGreen,
        Self::LightYellow,
        Self::LightBlue,
        Self::LightMagenta,
        Self::LightCyan,
        Self::LightWhite,
    ];

    /// Canonical full name of the color.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::LightBlack => "lightblack",
            Self::LightRed => "lightred",
            Self::LightGreen => "lightgreen",
            Self::LightYellow => "lightyellow",
            Self::LightBlue => "lightblue",
            Self::LightMagenta => "lightmagenta",
            Self::LightCyan => "lightcyan",
            Self::LightWhite => "lightwhite",
        }
    }

    /// ANSI color number (0-15).
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Returns true for the eight bright ("light") variants.
    #[must_use]
    pub const fn is_light(self) -> bool {
        self.number() >= 8
    }

    /// Foreground SGR parameter: 30-37 or 90-97.
    #[must_use]
    pub const fn fg_code(self) -> u8 {
        if self.is_light() {
            90 + (self.number() - 8)
        } else {
            30 + self.number()
        }
    }

    /// Background SGR parameter: 40-47 or 100-107.
    #[must_use]
    pub const fn bg_code(self) -> u8 {
        if self.is_light() {
            100 + (self.number() - 8)
        } else {
            40 + self.number()
        }
    }

    /// Strict lookup of a full name, abbreviation or alias.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_lowercase();
        if let Some(color) = Self::ALL.iter().find(|c| c.name() == token) {
            return Some(*color);
        }
        ABBREVIATIONS
            .iter()
            .find(|(abbr, _)| *abbr == token)
            .map(|(_, color)| *color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ColorParseError::Empty);
        }
        Self::parse(s).ok_or_else(|| ColorParseError::UnknownColor(s.trim().to_string()))
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Abbreviations and aliases accepted in place of a full color name.
pub const ABBREVIATIONS: [(&str, Color); 19] = [
    ("b", Color::Black),
    ("bk", Color::Black),
    ("r", Color::Red),
    ("g", Color::Green),
    ("y", Color::Yellow),
    ("bl", Color::Blue),
    ("m", Color::Magenta),
    ("c", Color::Cyan),
    ("w", Color::White),
    ("lk", Color::LightBlack),
    ("lr", Color::LightRed),
    ("lg", Color::LightGreen),
    ("ly", Color::LightYellow),
    ("lb", Color::LightBlue),
    ("lm", Color::LightMagenta),
    ("lc", Color::LightCyan),
    ("lw", Color::LightWhite),
    ("grey", Color::LightBlack),
    ("gray", Color::LightBlack),
];

/// Resolve any recognized name or abbreviation to its canonical color.
///
/// Unrecognized tokens never fail: they resolve to [`DEFAULT_FOREGROUND`]
/// and a warning is emitted through the `log` facade.
#[must_use]
pub fn resolve_name(token: &str) -> Color {
    Color::parse(token).unwrap_or_else(|| {
        log::warn!(
            "unrecognized color {token:?}, falling back to {}",
            DEFAULT_FOREGROUND
        );
        DEFAULT_FOREGROUND
    })
}

/// Foreground SGR code for a color token, resolved leniently.
#[must_use]
pub fn fg_code(token: &str) -> u8 {
    resolve_name(token).fg_code()
}

/// Background SGR code for a color token, resolved leniently.
#[must_use]
pub fn bg_code(token: &str) -> u8 {
    resolve_name(token).bg_code()
}

/// Error type for strict color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}
