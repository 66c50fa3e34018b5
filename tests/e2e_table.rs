//! End-to-end tests for Table rendering.
//!
//! Tables combine every other part of the crate: value formatting, markup,
//! the escape builder, display widths and the border glyphs.
//!
//! Run with: RUST_LOG=debug cargo test --test e2e_table -- --nocapture

mod common;

use common::assertions::{assert_err_logged, assert_ok_logged, assert_uniform_width};
use common::{init_test_logging, strip_ansi, test_phase};
use make_colors::border::{BorderChars, Decoration};
use make_colors::prelude::*;
use make_colors::renderables::format_value;

fn lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

// =============================================================================
// Scenario 1: Width auto-sizing
// =============================================================================

#[test]
fn e2e_table_width_follows_longest_cell() {
    init_test_logging();
    let mut table = Table::new().color(false);
    table.add_column("Hi");
    table.add_row(["Hello"]).unwrap();

    let output = table.draw();
    tracing::debug!(output = %output, "rendered table");
    assert_eq!(
        lines(&output),
        ["+-------+", "|  Hi   |", "+=======+", "| Hello |", "+-------+"]
    );
    assert_eq!(assert_uniform_width("auto width", &output), 9);
}

#[test]
fn e2e_table_wide_characters_keep_alignment() {
    init_test_logging();
    let mut table = Table::new().color(false);
    table.add_column("名前");
    table.add_rows([["日本"], ["abc"]]).unwrap();

    let output = table.draw();
    assert_eq!(
        lines(&output),
        [
            "+------+",
            "| 名前 |",
            "+======+",
            "| 日本 |",
            "+------+",
            "| abc  |",
            "+------+",
        ]
    );
    assert_uniform_width("cjk", &output);
}

#[test]
fn e2e_table_colored_output_has_uniform_visible_width() {
    init_test_logging();
    let mut table = Table::new();
    table.add_column(Column::new("Status").style("g"));
    table.add_column(Column::new("Detail").align(Align::Right));
    table.add_row(["[red]failed[/]", "exit 1"]).unwrap();
    table.add_row(["ok", "✓"]).unwrap();
    table.set_rows_color([Some("bold-y")]);

    let output = table.draw_with(true);
    assert!(output.contains('\x1b'));
    assert_uniform_width("colored", &output);
    assert_eq!(strip_ansi(&output), table.draw_with(false));
}

// =============================================================================
// Scenario 2: Cardinality
// =============================================================================

#[test]
fn e2e_table_row_cardinality_is_enforced() {
    init_test_logging();
    let mut table = Table::new().color(false);
    table.add_column("A");
    table.add_column("B");

    let err = assert_err_logged("short row", table.add_row(["only"]));
    assert_eq!(err, TableError::RowCardinality { expected: 2, found: 1 });
    let err = assert_err_logged("long row", table.add_row(["a", "b", "c"]));
    assert_eq!(err, TableError::RowCardinality { expected: 2, found: 3 });
    assert_eq!(table.row_count(), 0);

    assert_ok_logged("exact row", table.add_row(["a", "b"]));
    assert_eq!(table.row_count(), 1);
    assert!(!table.draw().is_empty());
}

#[test]
fn e2e_table_add_rows_stops_at_first_bad_row() {
    init_test_logging();
    let mut table = Table::new();
    table.add_column("A");
    let rows: Vec<Vec<&str>> = vec![vec!["1"], vec!["2"], vec!["3", "4"], vec!["5"]];
    let err = table.add_rows(rows).unwrap_err();
    assert_eq!(err.to_string(), "row should contain 1 elements, found 2");
    assert_eq!(table.row_count(), 2);
}

#[test]
fn e2e_table_bulk_setter_size_mismatch() {
    init_test_logging();
    let mut table = Table::new();
    table.header(["a", "b", "c"]).unwrap();
    assert_eq!(
        table.set_cols_align([Align::Left]),
        Err(TableError::ArraySize { expected: 3, found: 1 })
    );
    assert_eq!(
        table.set_cols_width([4, 0, 4]),
        Err(TableError::InvalidWidth { index: 1 })
    );
    assert!(table.columns().iter().all(|column| column.width.is_none()));
}

// =============================================================================
// Scenario 3: Decorations
// =============================================================================

#[test]
fn e2e_table_border_and_header_without_lines() {
    init_test_logging();
    let mut table = Table::new().color(false);
    table.add_column("A");
    table.add_column("B");
    table.set_deco(Decoration::BORDER | Decoration::HEADER);
    table.add_row(["x", "y"]).unwrap();

    let output = table.draw();
    let drawn = lines(&output);
    assert_eq!(drawn.len(), 5);
    assert_eq!(drawn, ["+-------+", "| A   B |", "+=======+", "| x   y |", "+-------+"]);
    for line in &drawn[1..drawn.len() - 1] {
        let inner = &line[1..line.len() - 1];
        assert!(!inner.contains('|'), "{line}");
    }
}

#[test]
fn e2e_table_every_decoration_combination_is_rectangular() {
    init_test_logging();
    for bits in 0..16u8 {
        let _phase = test_phase("decoration");
        let deco = Decoration::from_bits_truncate(bits);
        let mut table = Table::new().color(false).deco(deco);
        table.add_column("Name");
        table.add_column(Column::new("Score").align(Align::Right));
        table.add_rows([["ann", "7"], ["bartholomew", "10"]]).unwrap();

        let output = table.draw();
        tracing::debug!(bits, output = %output, "decoration combination");
        assert_uniform_width(&format!("deco {bits}"), &output);

        let expected_lines = 3
            + usize::from(deco.contains(Decoration::HEADER))
            + usize::from(deco.contains(Decoration::HLINES))
            + 2 * usize::from(deco.contains(Decoration::BORDER));
        assert_eq!(lines(&output).len(), expected_lines, "deco {bits}");
    }
}

#[test]
fn e2e_table_unicode_glyphs() {
    init_test_logging();
    let mut table = Table::new().color(false).chars(BorderChars::UNICODE);
    table.add_column("k");
    table.add_column("v");
    table.add_row(["a", "1"]).unwrap();

    assert_eq!(
        lines(&table.draw()),
        ["┼───┼───┼", "│ k │ v │", "┼═══┼═══┼", "│ a │ 1 │", "┼───┼───┼"]
    );
}

#[test]
fn e2e_table_custom_glyphs_from_string() {
    init_test_logging();
    let chars: BorderChars = "~:*#".parse().unwrap();
    let mut table = Table::new().color(false);
    table.set_chars(chars);
    table.add_column("x");
    table.add_row(["1"]).unwrap();
    assert_eq!(table.draw(), "*~~~*\n: x :\n*###*\n: 1 :\n*~~~*");
    assert!("abc".parse::<BorderChars>().is_err());
}

// =============================================================================
// Scenario 4: Formatting, alignment and widths
// =============================================================================

#[test]
fn e2e_table_data_types() {
    init_test_logging();
    let mut table = Table::new().color(false).deco(Decoration::empty());
    table
        .set_cols_dtype([
            DataType::Text,
            DataType::Float,
            DataType::Exponential,
            DataType::Integer,
            DataType::Auto,
        ])
        .unwrap();
    table.header(["t", "f", "e", "i", "a"]).unwrap();
    table
        .add_row(Row::new([
            CellValue::from("3.14159"),
            12.3456.into(),
            123_456.0.into(),
            "2.7".into(),
            42.into(),
        ]))
        .unwrap();

    assert_eq!(
        lines(&table.draw()),
        [
            "   t        f        e       i   a ",
            "3.14159   12.35   1.23e+05   3   42",
        ]
    );
}

#[test]
fn e2e_table_non_numeric_cells_fall_back_to_text() {
    init_test_logging();
    for dtype in [DataType::Integer, DataType::Float, DataType::Exponential] {
        assert_eq!(format_value(&CellValue::from("n/a"), dtype, 2), "n/a");
    }
    assert_eq!(format_value(&CellValue::Float(f64::NAN), DataType::Float, 2), "NaN");
}

#[test]
fn e2e_table_precision() {
    init_test_logging();
    let mut table = Table::new().color(false).deco(Decoration::empty());
    table.set_cols_dtype([DataType::Float]).unwrap();
    table.add_row([2.0 / 3.0]).unwrap();
    assert_eq!(table.draw(), "0.67");
    table.set_precision(4);
    assert_eq!(table.draw(), "0.6667");
    table.set_precision(0);
    assert_eq!(table.draw(), "1");
}

#[test]
fn e2e_table_fixed_width_truncates() {
    init_test_logging();
    let mut table = Table::new().color(false);
    table.set_cols_width([3, 4]).unwrap();
    table.add_row(["abcdef", "日本語"]).unwrap();
    assert_eq!(table.draw(), "+-----+------+\n| abc | 日本 |\n+-----+------+");
}

#[test]
fn e2e_table_max_width_shrinks_auto_columns() {
    init_test_logging();
    let mut table = Table::new().color(false).max_width(20);
    table.add_column("Description");
    table.add_column("N");
    table.add_row(["a fairly long description", "1"]).unwrap();

    let output = table.draw();
    assert_eq!(assert_uniform_width("max width", &output), 20);
    assert_eq!(
        lines(&output),
        [
            "+--------------+---+",
            "| Description  | N |",
            "+==============+===+",
            "| a fairly lon | 1 |",
            "+--------------+---+",
        ]
    );
}

#[test]
fn e2e_table_vertical_alignment() {
    init_test_logging();
    let mut table = Table::new()
        .color(false)
        .deco(Decoration::BORDER | Decoration::VLINES);
    table.header(["A", "B", "C"]).unwrap();
    table
        .set_cols_valign([VerticalAlign::Bottom, VerticalAlign::Top, VerticalAlign::Middle])
        .unwrap();
    table.add_row(["x", "1\n2\n3", "m"]).unwrap();

    assert_eq!(
        lines(&table.draw()),
        [
            "+---+---+---+",
            "| A | B | C |",
            "|   | 1 |   |",
            "|   | 2 | m |",
            "| x | 3 |   |",
            "+---+---+---+",
        ]
    );
}

// =============================================================================
// Scenario 5: Styles
// =============================================================================

#[test]
fn e2e_table_row_style_beats_column_style() {
    init_test_logging();
    let mut table = Table::new().deco(Decoration::empty());
    table.set_cols_color(["red", "g"]).unwrap();
    table.add_rows([["a", "b"], ["c", "d"]]).unwrap();
    table.set_rows_color([None, Some("bold-y")]);

    assert_eq!(
        lines(&table.draw_with(true)),
        [
            "\x1b[31ma\x1b[0m   \x1b[32mb\x1b[0m",
            "\x1b[1;33mc\x1b[0m   \x1b[1;33md\x1b[0m",
        ]
    );
}

#[test]
fn e2e_table_header_and_title_styles() {
    init_test_logging();
    let mut table = Table::new()
        .title("Totals")
        .title_style("lc")
        .header_style("underline")
        .deco(Decoration::empty());
    table.add_column(Column::new("Amount").style("red"));
    table.add_row([10]).unwrap();

    assert_eq!(
        lines(&table.draw_with(true)),
        [
            "\x1b[96mTotals\x1b[0m",
            "\x1b[4;37mAmount\x1b[0m",
            "\x1b[31m10\x1b[0m    ",
        ]
    );
}

// =============================================================================
// Scenario 6: Lifecycle
// =============================================================================

#[test]
fn e2e_table_reset_clears_columns_and_rows() {
    init_test_logging();
    let mut table = Table::new().title("kept");
    table.header(["a", "b", "c"]).unwrap();
    for i in 0..5 {
        table.add_row([i, i * 2, i * 3]).unwrap();
    }
    assert_eq!((table.column_count(), table.row_count()), (3, 5));

    table.reset();
    assert_eq!((table.column_count(), table.row_count()), (0, 0));
    assert_eq!(table.draw(), "");

    table.add_column("again");
    assert!(table.draw().contains("kept"));
}

#[test]
fn e2e_table_draw_is_repeatable() {
    init_test_logging();
    let mut table = Table::new();
    table.add_column("x");
    table.add_row(["1"]).unwrap();
    let first = table.draw();
    assert_eq!(table.draw(), first);
    assert_eq!(table.to_string(), first);
}
