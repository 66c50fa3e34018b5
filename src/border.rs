//! Border glyphs and decoration flags for tables.
//!
//! A table border is drawn from four glyphs: the horizontal fill, the
//! vertical separator, the corner/junction, and the fill of the rule under
//! the header. Which lines are drawn at all is controlled by [`Decoration`].

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::renderables::table::TableError;

bitflags! {
    /// Independently toggleable table decorations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Decoration: u8 {
        /// Outer frame: top and bottom rules plus the left and right edges.
        const BORDER = 1;
        /// Rule drawn directly under the header row.
        const HEADER = 2;
        /// Rules between data rows.
        const HLINES = 4;
        /// Vertical separators between columns.
        const VLINES = 8;
    }
}

impl Default for Decoration {
    fn default() -> Self {
        Self::all()
    }
}

/// Kind of rule line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Top frame, bottom frame, or a rule between data rows.
    Row,
    /// Rule directly under the header.
    Header,
}

/// The four glyphs a table border is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    /// Fill of frame and row rules.
    pub horizontal: char,
    /// Column separator and frame edge.
    pub vertical: char,
    /// Junction of rules with separators and frame corners.
    pub corner: char,
    /// Fill of the rule under the header.
    pub header: char,
}

impl BorderChars {
    /// Plain ASCII glyphs: `- | + =`.
    pub const ASCII: Self = Self::new('-', '|', '+', '=');

    /// Box-drawing glyphs: `─ │ ┼ ═`.
    pub const UNICODE: Self = Self::new('─', '│', '┼', '═');

    /// Create a glyph set.
    #[must_use]
    pub const fn new(horizontal: char, vertical: char, corner: char, header: char) -> Self {
        Self {
            horizontal,
            vertical,
            corner,
            header,
        }
    }

    /// Returns true if every glyph is ASCII.
    #[must_use]
    pub const fn is_ascii(&self) -> bool {
        self.horizontal.is_ascii()
            && self.vertical.is_ascii()
            && self.corner.is_ascii()
            && self.header.is_ascii()
    }

    /// Build a rule line for the given column widths.
    ///
    /// Each column contributes its width plus one fill glyph of padding on
    /// either side. Junctions between columns are drawn only when `deco`
    /// has [`Decoration::VLINES`], frame corners only with
    /// [`Decoration::BORDER`].
    #[must_use]
    pub fn build_rule(&self, widths: &[usize], kind: RuleKind, deco: Decoration) -> String {
        let fill = match kind {
            RuleKind::Row => self.horizontal,
            RuleKind::Header => self.header,
        };
        let junction = if deco.contains(Decoration::VLINES) {
            self.corner
        } else {
            fill
        };

        let mut result = String::new();
        if deco.contains(Decoration::BORDER) {
            result.push(self.corner);
            result.push(fill);
        }

        for (i, &width) in widths.iter().enumerate() {
            if i > 0 {
                result.push(fill);
                result.push(junction);
                result.push(fill);
            }
            result.extend(std::iter::repeat_n(fill, width));
        }

        if deco.contains(Decoration::BORDER) {
            result.push(fill);
            result.push(self.corner);
        }

        result
    }
}

impl Default for BorderChars {
    fn default() -> Self {
        Self::ASCII
    }
}

impl FromStr for BorderChars {
    type Err = TableError;

    /// Parse exactly four glyphs in the order horizontal, vertical,
    /// corner, header.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        match chars.as_slice() {
            &[horizontal, vertical, corner, header] => {
                Ok(Self::new(horizontal, vertical, corner, header))
            }
            _ => Err(TableError::ArraySize {
                expected: 4,
                found: chars.len(),
            }),
        }
    }
}

impl fmt::Display for BorderChars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.horizontal, self.vertical, self.corner, self.header
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_decoration_is_everything() {
        let deco = Decoration::default();
        assert!(deco.contains(Decoration::BORDER | Decoration::HEADER));
        assert!(deco.contains(Decoration::HLINES | Decoration::VLINES));
        assert_eq!(deco.bits(), 15);
    }

    #[test]
    fn test_rule_with_border_and_vlines() {
        let rule = BorderChars::ASCII.build_rule(&[3, 2], RuleKind::Row, Decoration::all());
        assert_eq!(rule, "+-----+----+");
    }

    #[test]
    fn test_header_rule_uses_header_fill() {
        let rule = BorderChars::ASCII.build_rule(&[3, 2], RuleKind::Header, Decoration::all());
        assert_eq!(rule, "+=====+====+");
    }

    #[test]
    fn test_rule_without_vlines() {
        let rule = BorderChars::ASCII.build_rule(&[1, 1], RuleKind::Row, Decoration::BORDER);
        assert_eq!(rule, "+-------+");
    }

    #[test]
    fn test_rule_without_border() {
        let deco = Decoration::HEADER | Decoration::VLINES;
        let rule = BorderChars::ASCII.build_rule(&[2, 2], RuleKind::Header, deco);
        assert_eq!(rule, "===+===");
    }

    #[test]
    fn test_unicode_rule() {
        let rule = BorderChars::UNICODE.build_rule(&[1, 1], RuleKind::Row, Decoration::all());
        assert_eq!(rule, "┼───┼───┼");
        assert!(!BorderChars::UNICODE.is_ascii());
        assert!(BorderChars::ASCII.is_ascii());
    }

    #[test]
    fn test_rule_empty_widths() {
        let rule = BorderChars::ASCII.build_rule(&[], RuleKind::Row, Decoration::all());
        assert_eq!(rule, "+--+");
    }

    #[test]
    fn test_from_str() {
        let chars: BorderChars = "~:*#".parse().unwrap();
        assert_eq!(chars, BorderChars::new('~', ':', '*', '#'));
        assert_eq!(chars.to_string(), "~:*#");
        assert_eq!("─│┼═".parse::<BorderChars>().unwrap(), BorderChars::UNICODE);
    }

    #[test]
    fn test_from_str_wrong_length() {
        assert_eq!(
            "-|+".parse::<BorderChars>(),
            Err(TableError::ArraySize {
                expected: 4,
                found: 3
            })
        );
        assert!("-|+=x".parse::<BorderChars>().is_err());
    }
}
