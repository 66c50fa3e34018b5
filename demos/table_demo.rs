//! Table demo: markup headers, column and row colors, number formats.
//!
//! Run with `cargo run --example table_demo`. Set `NO_COLOR=1` to see the
//! plain layout.

use std::error::Error;

use make_colors::prelude::*;

fn section(console: &Console, title: &str) {
    console.print(&format!("\n[bold]{title}[/]"));
    console.print(&"-".repeat(70));
}

fn main() -> Result<(), Box<dyn Error>> {
    let console = Console::new();

    section(&console, "Markup in title and headers");
    let mut table = Table::new().title("[bold cyan]Package Version Checker[/]");
    table.add_column("[bold white]Package[/]");
    table.add_column("[cyan]Installed[/]");
    table.add_column("[magenta]Required[/]");
    table.add_column("[yellow]Status[/]");
    table.add_row(["numpy", "1.21.0", "1.20.0", "✓ OK"])?;
    table.add_row(Row::new(["pandas", "1.3.0", "1.4.0", "! Update"]).style("bold-yellow"))?;
    table.add_row(["requests", "2.26.0", "2.26.0", "✓ OK"])?;
    table.add_row(Row::new(["flask", "1.1.0", "2.0.0", "✗ Old"]).style("bold-red"))?;
    println!("{}", console.render_table(&table));

    section(&console, "Column colors from abbreviations");
    let mut table = Table::new();
    let aligns = ["l", "r", "r", "c"].map(str::parse::<Align>);
    table.set_cols_align(aligns.into_iter().collect::<Result<Vec<_>, _>>()?)?;
    table.set_cols_dtype([DataType::Text, DataType::Float, DataType::Integer, DataType::Text])?;
    table.set_cols_color(["y", "r", "c", "g"])?;
    table.header(["Product", "Price", "Stock", "Status"])?;
    table.add_rows([
        Row::new([CellValue::from("Widget A"), 125.50.into(), 234.into(), "✓ Available".into()]),
        Row::new([CellValue::from("Widget B"), 89.99.into(), 0.into(), "✗ Out of Stock".into()]),
        Row::new([CellValue::from("Widget C"), 250.00.into(), 150.into(), "✓ Available".into()]),
    ])?;
    println!("{}", console.render_table(&table));

    section(&console, "Row colors");
    let mut table = Table::new();
    table.set_cols_align([Align::Left, Align::Center, Align::Right])?;
    table.header(["Server", "Status", "Load"])?;
    table.add_rows([
        ["Server 1", "✓ OK", "Low"],
        ["Server 2", "! Warning", "Medium"],
        ["Server 3", "✗ Critical", "High"],
        ["Server 4", "✓ OK", "Low"],
    ])?;
    table.set_rows_color([Some("green"), Some("yellow"), Some("bold-red"), Some("green")]);
    println!("{}", console.render_table(&table));

    section(&console, "Column and row colors combined");
    let mut table = Table::new()
        .title("Sales Dashboard")
        .title_style("bold-cyan");
    table.set_cols_align([Align::Left, Align::Right, Align::Right, Align::Center])?;
    table.set_cols_color(["bold-white", "green", "cyan", "yellow"])?;
    table.header(["Region", "Sales", "Target", "Performance"])?;
    table.add_rows([
        ["North", "150000", "120000", "✓ Exceeded"],
        ["South", "95000", "100000", "! Close"],
        ["East", "180000", "150000", "✓ Exceeded"],
        ["West", "75000", "100000", "✗ Below"],
    ])?;
    table.set_rows_color([None, Some("dim-yellow"), None, Some("dim-red")]);
    println!("{}", console.render_table(&table));

    section(&console, "Foregrounds, backgrounds and attributes");
    let mut table = Table::new();
    table.set_cols_align([Align::Left, Align::Right, Align::Right, Align::Right, Align::Center])?;
    table.set_cols_dtype([
        DataType::Text,
        DataType::Float,
        DataType::Float,
        DataType::Float,
        DataType::Text,
    ])?;
    table.set_cols_color(["bold-white", "green-black", "italic-cyan", "bold-yellow-blue", "lr"])?;
    table.header(["Stock", "Open", "High", "Low", "Change"])?;
    table.add_rows([
        Row::new([CellValue::from("AAPL"), 150.25.into(), 152.30.into(), 149.80.into(), "▲ +1.2%".into()]),
        Row::new([CellValue::from("GOOGL"), 2800.50.into(), 2825.00.into(), 2790.00.into(), "▲ +0.8%".into()]),
        Row::new([CellValue::from("MSFT"), 305.75.into(), 308.20.into(), 304.50.into(), "▼ -0.5%".into()]),
    ])?;
    println!("{}", console.render_table(&table));

    section(&console, "Decorations and glyphs");
    let mut table = Table::new()
        .title("User List")
        .title_style("bold-cyan")
        .deco(Decoration::BORDER | Decoration::HEADER | Decoration::VLINES)
        .chars(BorderChars::UNICODE);
    table.set_cols_align([Align::Right, Align::Left, Align::Left, Align::Right])?;
    table.set_cols_dtype([DataType::Text, DataType::Text, DataType::Text, DataType::Text])?;
    table.header(["ID", "Username", "Email", "Status"])?;
    table.add_rows([
        ["001", "john_doe", "john@example.com", "Active"],
        ["002", "jane_smith", "jane@example.com", "Active"],
        ["003", "bob_wilson", "bob@example.com", "Inactive"],
        ["004", "alice_brown", "alice@example.com", "Active"],
        ["005", "charlie_davis", "charlie@example.com", "Active"],
    ])?;
    table.set_rows_color([Some("dim"), None, Some("dim"), None, Some("dim")]);
    println!("{}", console.render_table(&table));

    section(&console, "Narrow table");
    let mut table = Table::new().max_width(40);
    table.add_column(Column::new("Task").style("bold"));
    table.add_column(Column::new("Notes").valign(VerticalAlign::Middle));
    table.add_column(Column::new("Done").align(Align::Center));
    table.add_row(["Deploy to production", "waiting on\nsign-off", "no"])?;
    table.add_row(["Write tests", "property tests for the layout engine", "yes"])?;
    println!("{}", console.render_table(&table));

    Ok(())
}
