//! Table - rows and columns drawn as a bordered, aligned grid.
//!
//! A [`Table`] owns its [`Column`] definitions and its [`Row`]s and renders
//! them to a multi-line string. Tables support:
//!
//! - Automatic column widths measured in terminal cells (CJK and emoji
//!   count as two, escape sequences and markup as zero)
//! - Fixed column widths and an optional maximum table width
//! - Left/center/right and top/middle/bottom alignment
//! - Number formatting per column data type
//! - Multi-line cells split on `\n`
//! - Column, row, header and title styles, and markup in any text
//! - Independently toggleable border decorations
//!
//! # Examples
//!
//! ## Column builders
//!
//! ```
//! use make_colors::renderables::table::{Align, Column, Table};
//!
//! let mut table = Table::new().color(false);
//! table.add_column(Column::new("Name"));
//! table.add_column(Column::new("Qty").align(Align::Right));
//! table.add_row(["apples", "3"]).unwrap();
//! table.add_row(["kiwis", "12"]).unwrap();
//!
//! assert_eq!(
//!     table.draw(),
//!     "\
//! +--------+-----+
//! |  Name  | Qty |
//! +========+=====+
//! | apples |   3 |
//! +--------+-----+
//! | kiwis  |  12 |
//! +--------+-----+"
//! );
//! ```
//!
//! ## Bulk setters
//!
//! ```
//! use make_colors::border::Decoration;
//! use make_colors::renderables::table::{Align, CellValue, DataType, Row, Table};
//!
//! let mut table = Table::new().color(false);
//! table.set_cols_align([Align::Left, Align::Right]).unwrap();
//! table.set_cols_dtype([DataType::Text, DataType::Float]).unwrap();
//! table.header(["Item", "Price"]).unwrap();
//! table.add_row(Row::new([CellValue::from("Widget"), 125.5.into()])).unwrap();
//! table.set_deco(Decoration::HEADER);
//!
//! assert_eq!(table.draw(), " Item    Price \n===============\nWidget   125.50");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::border::{BorderChars, Decoration, RuleKind};
use crate::cells;
use crate::markup::{self, MarkupSegment};
use crate::style::{self, ColorSpec};

/// Decimal places used for float and exponential cells unless changed.
pub const DEFAULT_PRECISION: usize = 2;

/// Magnitude above which [`DataType::Auto`] switches to exponential notation.
const AUTO_EXPONENT_THRESHOLD: f64 = 1e8;

/// Tab stops inside cells.
const TAB_SIZE: usize = 8;

/// Horizontal alignment of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for Align {
    type Err = TableError;

    /// Accepts `l`/`c`/`r` and the full words.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Self::Left),
            "c" | "center" | "centre" => Ok(Self::Center),
            "r" | "right" => Ok(Self::Right),
            _ => Err(TableError::InvalidOption(s.to_string())),
        }
    }
}

/// Vertical alignment of cell content within a multi-line row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl FromStr for VerticalAlign {
    type Err = TableError;

    /// Accepts `t`/`m`/`b` and the full words.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "t" | "top" => Ok(Self::Top),
            "m" | "middle" => Ok(Self::Middle),
            "b" | "bottom" => Ok(Self::Bottom),
            _ => Err(TableError::InvalidOption(s.to_string())),
        }
    }
}

/// How a column formats its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    /// Integers as integers, other numbers as floats, the rest as text.
    #[default]
    Auto,
    /// The value as given.
    Text,
    /// Fixed-point with the table precision.
    Float,
    /// Scientific notation with the table precision, e.g. `1.23e+05`.
    Exponential,
    /// Rounded to the nearest integer, ties to even.
    Integer,
}

impl FromStr for DataType {
    type Err = TableError;

    /// Accepts `a`/`t`/`f`/`e`/`i` and the full words.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "auto" => Ok(Self::Auto),
            "t" | "text" => Ok(Self::Text),
            "f" | "float" => Ok(Self::Float),
            "e" | "exp" | "exponential" => Ok(Self::Exponential),
            "i" | "int" | "integer" => Ok(Self::Integer),
            _ => Err(TableError::InvalidOption(s.to_string())),
        }
    }
}

/// A value stored in a table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl CellValue {
    /// The value as a finite number, parsing text if needed.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
            #[allow(clippy::cast_precision_loss)]
            Self::Integer(value) => *value as f64,
            Self::Float(value) => *value,
        };
        number.is_finite().then_some(number)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for CellValue {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CellValue {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for CellValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Format a value the way a column of type `dtype` displays it.
///
/// Values that cannot be read as a finite number are shown as text,
/// whatever the data type.
///
/// ```
/// use make_colors::renderables::table::{format_value, CellValue, DataType};
///
/// assert_eq!(format_value(&CellValue::Float(1.23456), DataType::Float, 3), "1.235");
/// assert_eq!(format_value(&CellValue::Float(123456.0), DataType::Exponential, 3), "1.235e+05");
/// assert_eq!(format_value(&CellValue::from("2.5"), DataType::Integer, 2), "2");
/// assert_eq!(format_value(&CellValue::from("n/a"), DataType::Float, 2), "n/a");
/// ```
#[must_use]
pub fn format_value(value: &CellValue, dtype: DataType, precision: usize) -> String {
    if dtype == DataType::Text {
        return value.to_string();
    }

    if let CellValue::Integer(int) = value {
        let small = int.unsigned_abs() <= 100_000_000;
        if dtype == DataType::Integer || (dtype == DataType::Auto && small) {
            return int.to_string();
        }
    }

    let Some(number) = value.as_number() else {
        if dtype != DataType::Auto {
            log::debug!("cell value {value} is not numeric, shown as text");
        }
        return value.to_string();
    };

    match dtype {
        DataType::Integer => format_integer(number),
        DataType::Float => format!("{number:.precision$}"),
        DataType::Exponential => format_exponential(number, precision),
        DataType::Auto if number.abs() > AUTO_EXPONENT_THRESHOLD => {
            format_exponential(number, precision)
        }
        DataType::Auto if number.fract() == 0.0 => format_integer(number),
        DataType::Auto => format!("{number:.precision$}"),
        DataType::Text => value.to_string(),
    }
}

fn format_integer(number: f64) -> String {
    let rounded = number.round_ties_even();
    if rounded == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    format!("{rounded:.0}")
}

/// C-style exponent: at least two digits and an explicit sign.
fn format_exponential(number: f64, precision: usize) -> String {
    let formatted = format!("{number:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

/// Column definition for a table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Column {
    /// Header text, may contain markup.
    pub header: String,
    /// Style for cell content.
    pub style: Option<ColorSpec>,
    /// Horizontal alignment of data cells. Headers are always centered.
    pub align: Align,
    /// Vertical alignment of data cells.
    pub valign: VerticalAlign,
    /// Value formatting.
    pub dtype: DataType,
    /// Fixed width in cells.
    pub width: Option<usize>,
}

impl Column {
    /// Create a new column with the given header.
    #[must_use]
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Self::default()
        }
    }

    /// Set the style for cell content.
    #[must_use]
    pub fn style(mut self, style: impl Into<ColorSpec>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Set horizontal alignment.
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set vertical alignment.
    #[must_use]
    pub fn valign(mut self, valign: VerticalAlign) -> Self {
        self.valign = valign;
        self
    }

    /// Set the data type.
    #[must_use]
    pub fn dtype(mut self, dtype: DataType) -> Self {
        self.dtype = dtype;
        self
    }

    /// Set a fixed width. Zero keeps the width automatic.
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = (width > 0).then_some(width);
        self
    }
}

impl From<&str> for Column {
    fn from(header: &str) -> Self {
        Self::new(header)
    }
}

impl From<String> for Column {
    fn from(header: String) -> Self {
        Self::new(header)
    }
}

/// A row of cell values with an optional row-wide style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    /// Cell values, one per column.
    pub cells: Vec<CellValue>,
    /// Overrides column styles for every cell of the row.
    pub style: Option<ColorSpec>,
}

impl Row {
    /// Create a row from cell values.
    pub fn new<T: Into<CellValue>>(cells: impl IntoIterator<Item = T>) -> Self {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            style: None,
        }
    }

    /// Set the row style.
    #[must_use]
    pub fn style(mut self, style: impl Into<ColorSpec>) -> Self {
        self.style = Some(style.into());
        self
    }
}

impl<T: Into<CellValue>> From<Vec<T>> for Row {
    fn from(cells: Vec<T>) -> Self {
        Self::new(cells)
    }
}

impl<T: Into<CellValue>, const N: usize> From<[T; N]> for Row {
    fn from(cells: [T; N]) -> Self {
        Self::new(cells)
    }
}

/// Errors raised by table construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A row does not have one value per column.
    RowCardinality { expected: usize, found: usize },
    /// A bulk setter or glyph list has the wrong number of elements.
    ArraySize { expected: usize, found: usize },
    /// A column width of zero was requested.
    InvalidWidth { index: usize },
    /// An alignment, vertical alignment or data type name was not recognized.
    InvalidOption(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowCardinality { expected, found } => {
                write!(f, "row should contain {expected} elements, found {found}")
            }
            Self::ArraySize { expected, found } => {
                write!(f, "array should contain {expected} elements, found {found}")
            }
            Self::InvalidWidth { index } => {
                write!(f, "width of column {index} must be greater than zero")
            }
            Self::InvalidOption(option) => write!(f, "invalid table option: {option:?}"),
        }
    }
}

impl std::error::Error for TableError {}

/// A cell's content split into display lines of styled segments.
struct CellLines(Vec<Vec<MarkupSegment>>);

impl CellLines {
    fn new(text: &str) -> Self {
        let segments = if markup::has_markup(text) {
            markup::parse_markup(text)
        } else {
            vec![MarkupSegment::plain(text)]
        };

        let mut lines = vec![Vec::new()];
        for segment in segments {
            for (i, piece) in segment.text.split('\n').enumerate() {
                if i > 0 {
                    lines.push(Vec::new());
                }
                if piece.is_empty() {
                    continue;
                }
                if let Some(line) = lines.last_mut() {
                    line.push(MarkupSegment {
                        text: piece.to_string(),
                        foreground: segment.foreground,
                        background: segment.background,
                        attributes: segment.attributes,
                    });
                }
            }
        }

        for line in &mut lines {
            let mut column = 0;
            for segment in line.iter_mut() {
                segment.text = cells::expand_tabs(&segment.text, column, TAB_SIZE);
                column += cells::visible_len(&segment.text);
            }
        }
        Self(lines)
    }

    fn height(&self) -> usize {
        self.0.len()
    }

    fn width(&self) -> usize {
        self.0.iter().map(|line| line_width(line)).max().unwrap_or(0)
    }

    /// The line shown at `index` of a row `height` lines tall.
    fn line_at(&self, index: usize, height: usize, valign: VerticalAlign) -> &[MarkupSegment] {
        let missing = height.saturating_sub(self.height());
        let offset = match valign {
            VerticalAlign::Top => 0,
            VerticalAlign::Middle => missing / 2,
            VerticalAlign::Bottom => missing,
        };
        index
            .checked_sub(offset)
            .and_then(|i| self.0.get(i))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn line_width(line: &[MarkupSegment]) -> usize {
    line.iter().map(|segment| cells::visible_len(&segment.text)).sum()
}

/// Style one piece of a cell line. Plain pieces take the cell style.
fn style_piece(segment: &MarkupSegment, text: &str, style: Option<&ColorSpec>, emit: bool) -> String {
    if !emit || text.is_empty() {
        return text.to_string();
    }
    if segment.is_plain() {
        return match style {
            Some(spec) => spec.render(text, true),
            None => text.to_string(),
        };
    }
    let params = style::sgr_params(segment.attributes, segment.background, segment.foreground);
    style::wrap(text, &params)
}

/// Render one line of a cell, truncated and padded to exactly `width` cells.
fn render_cell_line(
    line: &[MarkupSegment],
    width: usize,
    align: Align,
    style: Option<&ColorSpec>,
    emit: bool,
) -> String {
    let mut content = String::new();
    let mut used = 0;

    for segment in line {
        let remaining = width - used;
        let visible = cells::visible_len(&segment.text);
        let (text, text_width) = if visible <= remaining {
            let text = if emit {
                segment.text.clone()
            } else {
                cells::strip_ansi(&segment.text)
            };
            (text, visible)
        } else {
            cells::truncate_to_width(&cells::strip_ansi(&segment.text), remaining)
        };

        used += text_width;
        content.push_str(&style_piece(segment, &text, style, emit));
        if text_width < visible {
            break;
        }
    }

    let fill = width - used;
    match align {
        Align::Left => format!("{content}{}", " ".repeat(fill)),
        Align::Right => format!("{}{content}", " ".repeat(fill)),
        Align::Center => {
            let left = fill / 2;
            format!("{}{content}{}", " ".repeat(left), " ".repeat(fill - left))
        }
    }
}

/// A table of columns and rows rendered as a bordered grid.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
    /// Set once headers are declared through `add_column` or `header`.
    show_header: bool,
    title: Option<String>,
    title_style: Option<ColorSpec>,
    header_style: Option<ColorSpec>,
    deco: Decoration,
    chars: BorderChars,
    precision: usize,
    /// Maximum total width, 0 for unbounded.
    max_width: usize,
    color: bool,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            show_header: false,
            title: None,
            title_style: None,
            header_style: None,
            deco: Decoration::default(),
            chars: BorderChars::default(),
            precision: DEFAULT_PRECISION,
            max_width: 0,
            color: true,
        }
    }
}

impl Table {
    /// Create an empty table with every decoration and ASCII glyphs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title shown centered above the table. May contain markup.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title style, used when the title has no markup.
    #[must_use]
    pub fn title_style(mut self, style: impl Into<ColorSpec>) -> Self {
        self.title_style = Some(style.into());
        self
    }

    /// Set the header style, used for headers without markup.
    #[must_use]
    pub fn header_style(mut self, style: impl Into<ColorSpec>) -> Self {
        self.header_style = Some(style.into());
        self
    }

    /// Set the maximum table width (0 for unbounded).
    #[must_use]
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set whether [`Table::draw`] emits escape sequences.
    #[must_use]
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Set the decorations.
    #[must_use]
    pub fn deco(mut self, deco: Decoration) -> Self {
        self.deco = deco;
        self
    }

    /// Set the border glyphs.
    #[must_use]
    pub fn chars(mut self, chars: BorderChars) -> Self {
        self.chars = chars;
        self
    }

    /// Set the precision for float and exponential cells.
    #[must_use]
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Add a column (builder pattern).
    #[must_use]
    pub fn with_column(mut self, column: impl Into<Column>) -> Self {
        self.add_column(column);
        self
    }

    /// Add a column.
    ///
    /// Rows added before the column get an empty cell for it.
    pub fn add_column(&mut self, column: impl Into<Column>) {
        if !self.rows.is_empty() {
            log::debug!("column added after {} rows, padding them", self.rows.len());
            for row in &mut self.rows {
                row.cells.push(CellValue::default());
            }
        }
        self.columns.push(column.into());
        self.show_header = true;
    }

    /// Add a row.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RowCardinality`] if the row does not have one
    /// value per declared column. The row is not added.
    pub fn add_row(&mut self, row: impl Into<Row>) -> Result<(), TableError> {
        let row = row.into();
        if row.cells.len() != self.columns.len() {
            return Err(TableError::RowCardinality {
                expected: self.columns.len(),
                found: row.cells.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Add several rows, stopping at the first one with the wrong size.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RowCardinality`] for the first mismatched row.
    pub fn add_rows<R: Into<Row>>(&mut self, rows: impl IntoIterator<Item = R>) -> Result<(), TableError> {
        for row in rows {
            self.add_row(row)?;
        }
        Ok(())
    }

    /// Check a bulk setter's length, declaring the columns if none exist.
    fn declare_columns(&mut self, count: usize) -> Result<(), TableError> {
        if self.columns.is_empty() {
            self.columns = vec![Column::default(); count];
            Ok(())
        } else if count == self.columns.len() {
            Ok(())
        } else {
            Err(TableError::ArraySize {
                expected: self.columns.len(),
                found: count,
            })
        }
    }

    /// Set the header texts.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ArraySize`] if the count does not match the
    /// declared columns.
    pub fn header<S: Into<String>>(&mut self, headers: impl IntoIterator<Item = S>) -> Result<(), TableError> {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        self.declare_columns(headers.len())?;
        for (column, header) in self.columns.iter_mut().zip(headers) {
            column.header = header;
        }
        self.show_header = true;
        Ok(())
    }

    /// Set the alignment of every column.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ArraySize`] on a count mismatch.
    pub fn set_cols_align(&mut self, aligns: impl IntoIterator<Item = Align>) -> Result<(), TableError> {
        let aligns: Vec<Align> = aligns.into_iter().collect();
        self.declare_columns(aligns.len())?;
        for (column, align) in self.columns.iter_mut().zip(aligns) {
            column.align = align;
        }
        Ok(())
    }

    /// Set the vertical alignment of every column.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ArraySize`] on a count mismatch.
    pub fn set_cols_valign(
        &mut self,
        valigns: impl IntoIterator<Item = VerticalAlign>,
    ) -> Result<(), TableError> {
        let valigns: Vec<VerticalAlign> = valigns.into_iter().collect();
        self.declare_columns(valigns.len())?;
        for (column, valign) in self.columns.iter_mut().zip(valigns) {
            column.valign = valign;
        }
        Ok(())
    }

    /// Set the data type of every column.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ArraySize`] on a count mismatch.
    pub fn set_cols_dtype(&mut self, dtypes: impl IntoIterator<Item = DataType>) -> Result<(), TableError> {
        let dtypes: Vec<DataType> = dtypes.into_iter().collect();
        self.declare_columns(dtypes.len())?;
        for (column, dtype) in self.columns.iter_mut().zip(dtypes) {
            column.dtype = dtype;
        }
        Ok(())
    }

    /// Set a fixed width for every column.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidWidth`] for a zero width and
    /// [`TableError::ArraySize`] on a count mismatch. Nothing changes on error.
    pub fn set_cols_width(&mut self, widths: impl IntoIterator<Item = usize>) -> Result<(), TableError> {
        let widths: Vec<usize> = widths.into_iter().collect();
        if let Some(index) = widths.iter().position(|&width| width == 0) {
            return Err(TableError::InvalidWidth { index });
        }
        self.declare_columns(widths.len())?;
        for (column, width) in self.columns.iter_mut().zip(widths) {
            column.width = Some(width);
        }
        Ok(())
    }

    /// Set the style of every column.
    ///
    /// Styles are spec strings such as `"y"`, `"bold-red"` or
    /// `"white on blue"`, or anything else convertible to a [`ColorSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ArraySize`] on a count mismatch.
    pub fn set_cols_color<S: Into<ColorSpec>>(
        &mut self,
        styles: impl IntoIterator<Item = S>,
    ) -> Result<(), TableError> {
        let styles: Vec<ColorSpec> = styles.into_iter().map(Into::into).collect();
        self.declare_columns(styles.len())?;
        for (column, style) in self.columns.iter_mut().zip(styles) {
            column.style = Some(style);
        }
        Ok(())
    }

    /// Set the style of existing rows by index. `None` clears a row's style.
    ///
    /// Entries beyond the current row count are ignored.
    pub fn set_rows_color<S: Into<ColorSpec>>(&mut self, styles: impl IntoIterator<Item = Option<S>>) {
        let mut extra = 0;
        let mut rows = self.rows.iter_mut();
        for style in styles {
            match rows.next() {
                Some(row) => row.style = style.map(Into::into),
                None => extra += 1,
            }
        }
        if extra > 0 {
            log::debug!("ignoring {extra} row styles beyond the last row");
        }
    }

    /// Set the decorations.
    pub fn set_deco(&mut self, deco: Decoration) {
        self.deco = deco;
    }

    /// Set the border glyphs.
    pub fn set_chars(&mut self, chars: BorderChars) {
        self.chars = chars;
    }

    /// Set the precision for float and exponential cells.
    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision;
    }

    /// Set the maximum table width (0 for unbounded).
    pub fn set_max_width(&mut self, width: usize) {
        self.max_width = width;
    }

    /// Remove all columns and rows.
    ///
    /// Title, styles, decorations, glyphs, precision and maximum width are
    /// kept.
    pub fn reset(&mut self) {
        self.columns.clear();
        self.rows.clear();
        self.show_header = false;
    }

    /// Number of declared columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The declared columns.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The rows.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Current decorations.
    #[must_use]
    pub fn decoration(&self) -> Decoration {
        self.deco
    }

    /// Current border glyphs.
    #[must_use]
    pub fn border_chars(&self) -> BorderChars {
        self.chars
    }

    /// Render the table, emitting escape sequences if the table's color
    /// setting is on.
    #[must_use]
    pub fn draw(&self) -> String {
        self.draw_with(self.color)
    }

    /// Render the table with an explicit color decision.
    ///
    /// A table with no header and no rows renders as an empty string. Lines
    /// are joined with `\n` without a trailing newline.
    #[must_use]
    pub fn draw_with(&self, emit: bool) -> String {
        if self.columns.is_empty() || (!self.show_header && self.rows.is_empty()) {
            return String::new();
        }

        let header: Option<Vec<CellLines>> = self
            .show_header
            .then(|| self.columns.iter().map(|column| CellLines::new(&column.header)).collect());

        let body: Vec<Vec<CellLines>> = self
            .rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .zip(&self.columns)
                    .map(|(value, column)| {
                        CellLines::new(&format_value(value, column.dtype, self.precision))
                    })
                    .collect()
            })
            .collect();

        let widths = self.calculate_widths(header.as_deref(), &body);
        let rule = self.chars.build_rule(&widths, RuleKind::Row, self.deco);
        let mut lines = Vec::new();

        if let Some(title) = self.title.as_deref().filter(|title| !title.is_empty()) {
            self.draw_title(title, self.table_width(&widths), emit, &mut lines);
        }

        if self.deco.contains(Decoration::BORDER) {
            lines.push(rule.clone());
        }

        if let Some(header) = &header {
            let styles: Vec<Option<ColorSpec>> = self
                .columns
                .iter()
                .map(|column| self.header_style.or(column.style))
                .collect();
            self.draw_row(header, &widths, &styles, true, emit, &mut lines);
            if self.deco.contains(Decoration::HEADER) {
                lines.push(self.chars.build_rule(&widths, RuleKind::Header, self.deco));
            }
        }

        for (i, (row, row_cells)) in self.rows.iter().zip(&body).enumerate() {
            let styles: Vec<Option<ColorSpec>> = self
                .columns
                .iter()
                .map(|column| row.style.or(column.style))
                .collect();
            self.draw_row(row_cells, &widths, &styles, false, emit, &mut lines);
            if self.deco.contains(Decoration::HLINES) && i + 1 < self.rows.len() {
                lines.push(rule.clone());
            }
        }

        if self.deco.contains(Decoration::BORDER) {
            lines.push(rule);
        }

        lines.join("\n")
    }

    /// Cells taken by separators and the frame.
    fn overhead(&self) -> usize {
        let separators = 3 * self.columns.len().saturating_sub(1);
        if self.deco.contains(Decoration::BORDER) {
            separators + 4
        } else {
            separators
        }
    }

    fn table_width(&self, widths: &[usize]) -> usize {
        widths.iter().sum::<usize>() + self.overhead()
    }

    /// Calculate column widths.
    fn calculate_widths(&self, header: Option<&[CellLines]>, body: &[Vec<CellLines>]) -> Vec<usize> {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                if let Some(fixed) = column.width {
                    return fixed;
                }
                let header_width = header.and_then(|header| header.get(i)).map_or(0, CellLines::width);
                body.iter()
                    .filter_map(|row| row.get(i))
                    .map(CellLines::width)
                    .fold(header_width, usize::max)
            })
            .collect();

        if self.max_width == 0 || self.table_width(&widths) <= self.max_width {
            return widths;
        }

        let available = self.max_width.saturating_sub(self.overhead());
        self.collapse_widths(&widths, available)
    }

    /// Shrink automatic columns proportionally to fit `available` cells.
    fn collapse_widths(&self, widths: &[usize], available: usize) -> Vec<usize> {
        let total: usize = widths.iter().sum();
        if total <= available {
            return widths.to_vec();
        }

        let mut result = widths.to_vec();
        let excess = total - available;

        // Fixed columns keep their width, automatic ones keep at least one cell.
        let minimums: Vec<usize> = self
            .columns
            .iter()
            .zip(widths)
            .map(|(column, &width)| if column.width.is_some() { width } else { width.min(1) })
            .collect();

        let shrinkable: Vec<usize> = widths
            .iter()
            .zip(&minimums)
            .map(|(width, minimum)| width - minimum)
            .collect();

        let total_shrinkable: usize = shrinkable.iter().sum();
        if total_shrinkable == 0 {
            log::debug!("table cannot shrink below {total} cells of content");
            return result;
        }

        for (i, shrink) in shrinkable.iter().enumerate() {
            let reduction = (shrink * excess / total_shrinkable).min(*shrink);
            result[i] -= reduction;
        }

        // Rounding leftovers come off the rightmost columns first.
        let new_total: usize = result.iter().sum();
        if new_total > available {
            let mut diff = new_total - available;
            for i in (0..result.len()).rev() {
                if diff == 0 {
                    break;
                }
                let can_remove = (result[i] - minimums[i]).min(diff);
                result[i] -= can_remove;
                diff -= can_remove;
            }
        }

        result
    }

    fn draw_title(&self, title: &str, table_width: usize, emit: bool, lines: &mut Vec<String>) {
        for line in title.split('\n') {
            let (text, width) = if markup::has_markup(line) {
                let plain = markup::strip_markup(line);
                (markup::render_markup(line, emit), cells::visible_len(&plain))
            } else {
                let text = match &self.title_style {
                    Some(spec) if !line.is_empty() => spec.render(line, emit),
                    _ => line.to_string(),
                };
                (text, cells::visible_len(line))
            };
            let padding = table_width.saturating_sub(width) / 2;
            lines.push(format!("{}{text}", " ".repeat(padding)));
        }
    }

    fn draw_row(
        &self,
        cells: &[CellLines],
        widths: &[usize],
        styles: &[Option<ColorSpec>],
        is_header: bool,
        emit: bool,
        lines: &mut Vec<String>,
    ) {
        let border = self.deco.contains(Decoration::BORDER);
        let separator = if self.deco.contains(Decoration::VLINES) {
            self.chars.vertical
        } else {
            ' '
        };
        let height = cells.iter().map(CellLines::height).max().unwrap_or(1);

        for index in 0..height {
            let mut line = String::new();
            if border {
                line.push(self.chars.vertical);
                line.push(' ');
            }

            for (i, ((cell, column), &width)) in cells.iter().zip(&self.columns).zip(widths).enumerate() {
                if i > 0 {
                    line.push(' ');
                    line.push(separator);
                    line.push(' ');
                }
                let (align, valign) = if is_header {
                    (Align::Center, VerticalAlign::Top)
                } else {
                    (column.align, column.valign)
                };
                let style = styles.get(i).and_then(Option::as_ref);
                line.push_str(&render_cell_line(
                    cell.line_at(index, height, valign),
                    width,
                    align,
                    style,
                    emit,
                ));
            }

            if border {
                line.push(' ');
                line.push(self.chars.vertical);
            }
            lines.push(line);
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.draw())
    }
}
