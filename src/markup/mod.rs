//! Markup parsing for inline-styled text.
//!
//! This module turns strings like `"[bold white on blue]Status[/] ok"` into
//! an ordered list of [`MarkupSegment`]s, each carrying its own colors and
//! attributes, and renders those segments into escape sequences.
//!
//! Spans do not nest. While a span is open, further opening tags are kept
//! as literal text, and the next closing tag (`[/]` or `[/name]`) ends the
//! span. Markup that cannot be matched is never an error: a closing tag
//! with nothing open, or an opening tag that is never closed, stays in the
//! output as the raw bracket text.

use regex::Regex;
use std::sync::LazyLock;

use crate::color::{Color, resolve_name};
use crate::style::{self, Attributes};

/// A run of text with the styling of the span it came from.
///
/// Plain text between spans is a segment with every styling field empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupSegment {
    /// The text content, with markup delimiters removed.
    pub text: String,
    /// Foreground color named by the span.
    pub foreground: Option<Color>,
    /// Background color named by the span (`on <bg>`).
    pub background: Option<Color>,
    /// Style keywords named by the span.
    pub attributes: Attributes,
}

impl MarkupSegment {
    /// Create an unstyled segment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns true if no color or attribute is set.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.foreground.is_none() && self.background.is_none() && self.attributes.is_empty()
    }

    /// Render this segment, wrapping styled text in an escape sequence.
    #[must_use]
    pub fn render(&self, emit: bool) -> String {
        if !emit || self.is_plain() {
            return self.text.clone();
        }
        let params = style::sgr_params(self.attributes, self.background, self.foreground);
        style::wrap(&self.text, &params)
    }
}

// Matches: optional backslashes, then [tag_content]
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\\*)\[([a-zA-Z/][^\[\]]*?)\]").expect("invalid regex"));

// A complete span: [style]...[/...]
static SPAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[[a-zA-Z][^\[\]]*\].*?\[/[^\[\]]*\]").expect("invalid regex"));

/// Parse the style text of an opening tag.
///
/// Returns `(foreground, background, attributes)`. The style text is an
/// optional run of style keywords followed by `<fg>`, `<fg> on <bg>` or
/// `on <bg>`. Unknown color words resolve through the registry fallback.
#[must_use]
pub fn parse_tag_style(style: &str) -> (Option<Color>, Option<Color>, Attributes) {
    let mut foreground = None;
    let mut background = None;
    let mut attributes = Attributes::empty();
    let mut expect_background = false;

    for word in style.split(|c: char| c.is_whitespace() || c == ',') {
        if word.is_empty() {
            continue;
        }
        if let Some(attr) = Attributes::from_keyword(word) {
            attributes |= attr;
        } else if word.eq_ignore_ascii_case("on") {
            expect_background = true;
        } else if expect_background {
            background = Some(resolve_name(word));
            expect_background = false;
        } else if foreground.is_none() {
            foreground = Some(resolve_name(word));
        } else {
            log::debug!("ignoring extra color {word:?} in markup tag [{style}]");
        }
    }

    (foreground, background, attributes)
}

/// Returns true if every word of the tag is a style keyword, `on`, or a
/// known color.
fn is_style_text(style: &str) -> bool {
    style
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty())
        .all(|word| {
            Attributes::from_keyword(word).is_some()
                || word.eq_ignore_ascii_case("on")
                || Color::parse(word).is_some()
        })
}

/// Replace backslash-escaped brackets with literal brackets.
fn unescape(text: &str) -> String {
    text.replace("\\[", "[").replace("\\]", "]")
}

/// Accumulates output segments, merging adjacent plain text.
#[derive(Default)]
struct SegmentBuilder {
    segments: Vec<MarkupSegment>,
    plain: String,
}

impl SegmentBuilder {
    fn push_plain(&mut self, text: &str) {
        self.plain.push_str(text);
    }

    fn flush_plain(&mut self) {
        if !self.plain.is_empty() {
            let text = std::mem::take(&mut self.plain);
            self.segments.push(MarkupSegment::plain(text));
        }
    }

    fn push_styled(&mut self, span: OpenSpan) {
        self.flush_plain();
        let (foreground, background, attributes) = parse_tag_style(&span.style);
        self.segments.push(MarkupSegment {
            text: span.content,
            foreground,
            background,
            attributes,
        });
    }

    /// Give up on an open span, keeping its raw tag as text.
    fn push_literal(&mut self, span: OpenSpan) {
        self.push_plain(&span.raw);
        self.push_plain(&span.content);
    }

    fn finish(mut self) -> Vec<MarkupSegment> {
        self.flush_plain();
        self.segments
    }
}

/// An opening tag waiting for its closing tag.
struct OpenSpan {
    /// Style text inside the brackets.
    style: String,
    /// The raw opening tag, kept in case the span is never closed.
    raw: String,
    /// Content collected so far.
    content: String,
}

/// Append text to the open span, or to the plain run when none is open.
fn push_text(open: &mut Option<OpenSpan>, builder: &mut SegmentBuilder, text: &str) {
    match open {
        Some(span) => span.content.push_str(text),
        None => builder.push_plain(text),
    }
}

/// Parse markup into ordered segments.
///
/// Concatenating the `text` of the returned segments yields the input with
/// markup delimiters removed and escaped brackets made literal.
///
/// ```
/// use make_colors::markup::parse_markup;
/// use make_colors::color::Color;
///
/// let segments = parse_markup("[red]Error:[/] detail");
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].text, "Error:");
/// assert_eq!(segments[0].foreground, Some(Color::Red));
/// assert_eq!(segments[1].text, " detail");
/// assert!(segments[1].is_plain());
/// ```
#[must_use]
pub fn parse_markup(text: &str) -> Vec<MarkupSegment> {
    if !text.contains('[') && !text.contains(']') {
        return vec![MarkupSegment::plain(text)];
    }

    let mut builder = SegmentBuilder::default();
    let mut open: Option<OpenSpan> = None;
    let mut last_end = 0;

    for cap in TAG_PATTERN.captures_iter(text) {
        let Some(full) = cap.get(0) else { continue };
        let backslashes = cap.get(1).map_or("", |m| m.as_str());
        let tag = cap.get(2).map_or("", |m| m.as_str());

        push_text(&mut open, &mut builder, &unescape(&text[last_end..full.start()]));
        last_end = full.end();

        // Each pair of backslashes becomes one literal backslash.
        let num_backslashes = backslashes.len();
        push_text(&mut open, &mut builder, &"\\".repeat(num_backslashes / 2));

        if num_backslashes % 2 == 1 {
            push_text(&mut open, &mut builder, &format!("[{tag}]"));
            continue;
        }

        let raw = &full.as_str()[num_backslashes..];
        if tag.starts_with('/') {
            match open.take() {
                Some(span) => builder.push_styled(span),
                None => {
                    log::debug!("closing tag {raw} has nothing to close");
                    builder.push_plain(raw);
                }
            }
            continue;
        }

        match open.take() {
            Some(span) if is_style_text(&span.style) => {
                log::debug!("nested tag {raw} inside [{}] kept as text", span.style);
                let mut span = span;
                span.content.push_str(raw);
                open = Some(span);
            }
            previous => {
                // An open tag that names no style (`x[i] ... [red]`) was
                // probably not markup at all.
                if let Some(span) = previous {
                    builder.push_literal(span);
                }
                open = Some(OpenSpan {
                    style: tag.trim().to_string(),
                    raw: raw.to_string(),
                    content: String::new(),
                });
            }
        }
    }

    push_text(&mut open, &mut builder, &unescape(&text[last_end..]));

    if let Some(span) = open {
        log::debug!("unterminated tag {} kept as text", span.raw);
        builder.push_literal(span);
    }

    builder.finish()
}

/// Returns true if the text contains at least one complete `[style]...[/]` span.
#[must_use]
pub fn has_markup(text: &str) -> bool {
    text.contains("[/") && SPAN_PATTERN.is_match(text)
}

/// Render markup, wrapping every styled segment in its escape sequence.
///
/// With `emit` false the result is the plain text of the segments.
#[must_use]
pub fn render_markup(text: &str, emit: bool) -> String {
    parse_markup(text)
        .iter()
        .map(|segment| segment.render(emit))
        .collect()
}

/// Remove markup, returning only the text content.
#[must_use]
pub fn strip_markup(text: &str) -> String {
    render_markup(text, false)
}

/// Escape text for use in markup.
///
/// This escapes any `[` characters so they are treated as literal text.
#[must_use]
pub fn escape(text: &str) -> String {
    text.replace('[', "\\[")
}
