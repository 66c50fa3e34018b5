//! Color demo: every color, spec strings, markup and the logger.
//!
//! Run with `cargo run --example colors_demo`.

use log::LevelFilter;
use make_colors::color::{ABBREVIATIONS, Color};
use make_colors::logging::ColorLogger;
use make_colors::prelude::*;

fn main() {
    ColorLogger::new()
        .level(LevelFilter::Info)
        .markup(true)
        .init()
        .ok();

    let console = Console::new();

    console.print("[bold]Foregrounds[/]");
    for color in Color::ALL {
        let sample = console.format_spec(&format!("{:<14}", color.name()), color.name(), false);
        let on = console.format_spec("  sample  ", &format!("black-{}", color.name()), false);
        println!("{sample} {on}");
    }

    console.print("\n[bold]Abbreviations[/]");
    let abbreviations: Vec<String> = ABBREVIATIONS
        .iter()
        .map(|(abbr, color)| console.format_spec(abbr, color.name(), false))
        .collect();
    println!("{}", abbreviations.join(" "));

    console.print("\n[bold]Spec strings[/]");
    for spec in ["bold-red", "italic_lightblue", "underline,y", "white-red", "bold-lw-lr", "reverse-g"] {
        println!("{:<18} {}", spec, make_colors(&format!("{spec} example"), spec));
    }

    console.print("\n[bold]Markup[/]");
    console.print("[white on red] ERROR [/] disk full on [bold]/dev/sda1[/]");
    console.print("[lg]✓[/] tests passed, [ly]![/] 2 skipped, \\[literal] brackets");
    println!("{}", colorize("no markup, default color", None));

    log::info!("logger installed, [green]markup[/] enabled");
    log::warn!("unknown colors fall back to {}", make_colors::color::DEFAULT_FOREGROUND);
    let _ = ColorSpec::parse("bold-chartreuse");
}
