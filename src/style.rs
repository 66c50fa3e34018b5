//! Color specifications and SGR escape sequences.
//!
//! This module provides [`ColorSpec`], the canonical (foreground, background,
//! attributes) triple, the parser that builds it from spec strings such as
//! `"bold-red-yellow"` or `"bold white on blue"`, and the builder that turns
//! it into an ANSI SGR escape sequence.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::color::{Color, DEFAULT_FOREGROUND, resolve_name};

/// Reset sequence appended after every styled payload.
pub const RESET: &str = "\x1b[0m";

bitflags! {
    /// Text attribute flags.
    ///
    /// Each flag corresponds to an ANSI SGR (Select Graphic Rendition) code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        /// Bold/bright text (SGR 1).
        const BOLD      = 1 << 0;
        /// Dim/faint text (SGR 2).
        const DIM       = 1 << 1;
        /// Italic text (SGR 3).
        const ITALIC    = 1 << 2;
        /// Single underline (SGR 4).
        const UNDERLINE = 1 << 3;
        /// Slow blinking text (SGR 5).
        const BLINK     = 1 << 4;
        /// Reverse video (SGR 7).
        const REVERSE   = 1 << 5;
        /// Concealed/hidden text (SGR 8).
        const HIDDEN    = 1 << 6;
        /// Strikethrough text (SGR 9).
        const STRIKE    = 1 << 7;
    }
}

impl Attributes {
    /// Map of attribute flags to their ANSI SGR codes and canonical names.
    const TABLE: [(Self, u8, &'static str); 8] = [
        (Self::BOLD, 1, "bold"),
        (Self::DIM, 2, "dim"),
        (Self::ITALIC, 3, "italic"),
        (Self::UNDERLINE, 4, "underline"),
        (Self::BLINK, 5, "blink"),
        (Self::REVERSE, 7, "reverse"),
        (Self::HIDDEN, 8, "hidden"),
        (Self::STRIKE, 9, "strikethrough"),
    ];

    /// Get the ANSI SGR codes for enabled attributes, in code order.
    #[must_use]
    pub fn to_sgr_codes(&self) -> SmallVec<[u8; 8]> {
        Self::TABLE
            .iter()
            .filter(|(attr, _, _)| self.contains(*attr))
            .map(|(_, code, _)| *code)
            .collect()
    }

    /// Canonical names of the enabled attributes.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        Self::TABLE
            .iter()
            .filter(|(attr, _, _)| self.contains(*attr))
            .map(|(_, _, name)| *name)
            .collect()
    }

    /// Parse a single attribute keyword.
    #[must_use]
    pub fn from_keyword(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bold" => Some(Self::BOLD),
            "dim" => Some(Self::DIM),
            "italic" => Some(Self::ITALIC),
            "underline" => Some(Self::UNDERLINE),
            "blink" => Some(Self::BLINK),
            "reverse" => Some(Self::REVERSE),
            "hidden" | "conceal" => Some(Self::HIDDEN),
            "strikethrough" | "strike" => Some(Self::STRIKE),
            _ => None,
        }
    }

    /// SGR code of a single attribute keyword.
    #[must_use]
    pub fn attribute_code(name: &str) -> Option<u8> {
        let attr = Self::from_keyword(name)?;
        Self::TABLE
            .iter()
            .find(|(flag, _, _)| *flag == attr)
            .map(|(_, code, _)| *code)
    }
}

/// Canonical parse result: one escape sequence worth of styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorSpec {
    /// Foreground color, always resolved.
    pub foreground: Color,
    /// Optional background color.
    pub background: Option<Color>,
    /// Enabled attributes.
    pub attributes: Attributes,
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::new(DEFAULT_FOREGROUND)
    }
}

/// Result of parsing with diagnostics.
///
/// Parsing never fails; tokens that could not be recognized are reported
/// here so callers can surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    /// The resolved spec.
    pub spec: ColorSpec,
    /// Tokens that fell back to the default color or were dropped.
    pub unrecognized: Vec<String>,
}

impl ColorSpec {
    /// Create a spec with only a foreground color.
    #[must_use]
    pub const fn new(foreground: Color) -> Self {
        Self {
            foreground,
            background: None,
            attributes: Attributes::empty(),
        }
    }

    /// Set the background color.
    #[must_use]
    pub const fn on(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    /// Add attributes.
    #[must_use]
    pub fn with(mut self, attributes: Attributes) -> Self {
        self.attributes |= attributes;
        self
    }

    /// Parse a combined spec string such as `"bold-red-yellow"`.
    ///
    /// Tokens may be separated by `-`, `_`, `,` or whitespace. Attribute
    /// keywords are extracted wherever they appear; of the remaining tokens
    /// the first is the foreground and the second the background. The
    /// keyword `on` marks the next token as the background.
    ///
    /// ```
    /// use make_colors::color::Color;
    /// use make_colors::style::{Attributes, ColorSpec};
    ///
    /// let spec = ColorSpec::parse("bold-white-red");
    /// assert_eq!(spec.foreground, Color::White);
    /// assert_eq!(spec.background, Some(Color::Red));
    /// assert!(spec.attributes.contains(Attributes::BOLD));
    /// ```
    #[must_use]
    pub fn parse(data: &str) -> Self {
        parse_report(Some(data), None, None, &[]).spec
    }

    /// Build a spec from explicit parts.
    ///
    /// Color names pass through the registry, unknown attribute names are
    /// ignored.
    #[must_use]
    pub fn from_parts(foreground: Option<&str>, background: Option<&str>, attrs: &[&str]) -> Self {
        parse_report(None, foreground, background, attrs).spec
    }

    /// SGR parameters in emission order: attributes, background, foreground.
    #[must_use]
    pub fn sgr_params(&self) -> SmallVec<[u8; 10]> {
        sgr_params(self.attributes, self.background, Some(self.foreground))
    }

    /// The escape prefix for this spec, e.g. `"\x1b[1;41;37m"`.
    #[must_use]
    pub fn escape_sequence(&self) -> String {
        escape_sequence(&self.sgr_params())
    }

    /// Wrap `text` in this spec's escape sequence and a reset.
    ///
    /// When `emit` is false the text is returned unchanged.
    ///
    /// ```
    /// use make_colors::style::ColorSpec;
    ///
    /// let spec = ColorSpec::parse("red");
    /// assert_eq!(spec.render("Error", true), "\x1b[31mError\x1b[0m");
    /// assert_eq!(spec.render("Error", false), "Error");
    /// ```
    #[must_use]
    pub fn render(&self, text: &str, emit: bool) -> String {
        if !emit {
            return text.to_string();
        }
        wrap(text, &self.sgr_params())
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.attributes.names();
        parts.push(self.foreground.name());
        if let Some(bg) = self.background {
            parts.push("on");
            parts.push(bg.name());
        }
        write!(f, "{}", parts.join(" "))
    }
}

impl FromStr for ColorSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        Self::new(color)
    }
}

impl From<&str> for ColorSpec {
    fn from(data: &str) -> Self {
        Self::parse(data)
    }
}

impl From<String> for ColorSpec {
    fn from(data: String) -> Self {
        Self::parse(&data)
    }
}

/// Separators accepted between spec tokens.
fn is_separator(c: char) -> bool {
    matches!(c, '-' | '_' | ',') || c.is_whitespace()
}

/// Parse a spec string or explicit parts, collecting diagnostics.
///
/// If `data` is present it is tokenized; explicit `attrs` are merged and an
/// explicit `background` is used only when `data` named none. Without
/// `data` the explicit `foreground`/`background` are resolved directly.
#[must_use]
pub fn parse_report(
    data: Option<&str>,
    foreground: Option<&str>,
    background: Option<&str>,
    attrs: &[&str],
) -> ParseReport {
    let mut unrecognized = Vec::new();
    let mut attributes = Attributes::empty();

    for name in attrs {
        match Attributes::from_keyword(name) {
            Some(attr) => attributes |= attr,
            None => {
                log::debug!("ignoring unknown attribute {name:?}");
                unrecognized.push((*name).to_string());
            }
        }
    }

    let mut resolve = |token: &str| -> Color {
        Color::parse(token).unwrap_or_else(|| {
            unrecognized.push(token.to_string());
            resolve_name(token)
        })
    };

    let (fg, bg) = match data {
        Some(data) => {
            let mut colors: Vec<&str> = Vec::new();
            let mut on_color: Option<&str> = None;
            let mut expect_background = false;

            for token in data.split(is_separator).filter(|t| !t.is_empty()) {
                if let Some(attr) = Attributes::from_keyword(token) {
                    attributes |= attr;
                } else if token.eq_ignore_ascii_case("on") {
                    expect_background = true;
                } else if expect_background {
                    on_color = Some(token);
                    expect_background = false;
                } else {
                    colors.push(token);
                }
            }

            let mut colors = colors.into_iter();
            let fg_token = colors.next();
            let bg_token = on_color.or_else(|| colors.next()).or(background);
            for extra in colors {
                log::debug!("ignoring extra color token {extra:?} in {data:?}");
            }

            (fg_token.or(foreground), bg_token)
        }
        None => (foreground, background),
    };

    let foreground = fg.map_or(DEFAULT_FOREGROUND, &mut resolve);
    let background = bg.map(&mut resolve);

    ParseReport {
        spec: ColorSpec {
            foreground,
            background,
            attributes,
        },
        unrecognized,
    }
}

/// Parse a spec, the general entry point mirroring [`parse_report`].
#[must_use]
pub fn parse(
    data: Option<&str>,
    foreground: Option<&str>,
    background: Option<&str>,
    attrs: &[&str],
) -> ColorSpec {
    parse_report(data, foreground, background, attrs).spec
}

/// Collect SGR parameters: attributes first, then background, then foreground.
#[must_use]
pub fn sgr_params(
    attributes: Attributes,
    background: Option<Color>,
    foreground: Option<Color>,
) -> SmallVec<[u8; 10]> {
    let mut params: SmallVec<[u8; 10]> = SmallVec::new();
    params.extend(attributes.to_sgr_codes());
    if let Some(bg) = background {
        params.push(bg.bg_code());
    }
    if let Some(fg) = foreground {
        params.push(fg.fg_code());
    }
    params
}

/// Build `ESC[<params>m` from a parameter list.
#[must_use]
pub fn escape_sequence(params: &[u8]) -> String {
    let joined: Vec<String> = params.iter().map(ToString::to_string).collect();
    format!("\x1b[{}m", joined.join(";"))
}

/// Wrap text in the escape sequence for `params` followed by [`RESET`].
///
/// An empty parameter list leaves the text untouched.
#[must_use]
pub fn wrap(text: &str, params: &[u8]) -> String {
    if params.is_empty() {
        return text.to_string();
    }
    let prefix = escape_sequence(params);
    let mut result = String::with_capacity(prefix.len() + text.len() + RESET.len());
    result.push_str(&prefix);
    result.push_str(text);
    result.push_str(RESET);
    result
}
