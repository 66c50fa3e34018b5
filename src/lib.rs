//! # make_colors
//!
//! Terminal text coloring with ANSI SGR escape sequences.
//!
//! Colors are named (`red`, `lightblue`, ...) or abbreviated (`r`, `lb`, ...),
//! combined with attributes into a compact spec string such as
//! `"bold-red-yellow"`, or written inline with bracket markup such as
//! `"[white on red]ERROR[/] disk full"`. A table layout engine renders data
//! as an aligned grid with the same styling.
//!
//! ## Quick Start
//!
//! ```
//! use make_colors::prelude::*;
//!
//! let console = Console::builder().force_color().build();
//! assert_eq!(console.format_spec("Hello", "bold-red", false), "\x1b[1;31mHello\x1b[0m");
//! assert_eq!(
//!     console.colorize("[green]ok[/] done", None, false),
//!     "\x1b[32mok\x1b[0m done"
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Color**: one of the sixteen standard terminal colors
//! - **`ColorSpec`**: foreground, optional background and attributes
//! - **Markup**: inline `[style]text[/]` spans, parsed into segments
//! - **Console**: holds the color decision and formats text with it
//! - **Table**: columns, rows and border decorations rendered to a string
//!
//! Color output follows `NO_COLOR`, `FORCE_COLOR`, `MAKE_COLORS`,
//! `MAKE_COLORS_FORCE` and `TERM`; see [`terminal`].

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod border;
pub mod cells;
pub mod color;
pub mod console;
pub mod logging;
pub mod markup;
pub mod renderables;
pub mod style;
pub mod sync;
pub mod terminal;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::border::{BorderChars, Decoration};
    pub use crate::color::Color;
    pub use crate::console::{Console, colorize, make_colors};
    pub use crate::markup::{MarkupSegment, parse_markup, render_markup, strip_markup};
    pub use crate::renderables::{
        Align, CellValue, Column, DataType, Row, Table, TableError, VerticalAlign,
    };
    pub use crate::style::{Attributes, ColorSpec};
}

// Re-export key types at crate root
pub use color::{Color, ColorParseError};
pub use console::{Console, colorize, make_colors};
pub use markup::MarkupSegment;
pub use renderables::{Column, Row, Table, TableError};
pub use style::{Attributes, ColorSpec};
