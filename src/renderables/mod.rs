//! Renderable components built on the escape builder and markup parser.
//!
//! - [`Table`]: rows and columns drawn as a bordered, aligned grid
//!
//! ```
//! use make_colors::renderables::{Column, Table};
//!
//! let mut table = Table::new().color(false);
//! table.add_column(Column::new("Key"));
//! table.add_row(["a"]).unwrap();
//! assert_eq!(table.draw(), "+-----+\n| Key |\n+=====+\n| a   |\n+-----+");
//! ```

pub mod table;

pub use table::{
    Align, CellValue, Column, DataType, Row, Table, TableError, VerticalAlign, format_value,
};
