//! Global installation of the colored logger.
//!
//! Only one logger can ever be installed per process, so this binary
//! installs `ColorLogger` once and runs every check from that state. It
//! does not use the tracing test subscriber.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use log::LevelFilter;
use make_colors::logging::ColorLogger;
use make_colors::sync::lock_recover;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn take(&self) -> String {
        let bytes = std::mem::take(&mut *lock_recover(&self.0));
        String::from_utf8(bytes).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock_recover(&self.0).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_installed_logger_formats_records() {
    let buffer = SharedBuffer::default();
    ColorLogger::new()
        .level(LevelFilter::Debug)
        .show_time(false)
        .markup(true)
        .color(true)
        .writer(buffer.clone())
        .init()
        .expect("first logger installation succeeds");

    assert!(
        ColorLogger::new().init().is_err(),
        "a second logger cannot be installed"
    );
    // Building the second logger logged its color detection.
    buffer.take();

    log::info!("[bold]ready[/] on port {}", 8080);
    log::warn!("disk at {}%", 91);
    log::trace!("filtered out");
    log::logger().flush();

    assert_eq!(
        buffer.take(),
        "\x1b[32mINFO \x1b[0m \x1b[1mready\x1b[0m on port 8080\n\
         \x1b[33mWARN \x1b[0m disk at 91%\n"
    );

    // Library warnings about unknown colors reach the installed logger.
    let _ = make_colors::color::resolve_name("chartreuse");
    let output = buffer.take();
    assert!(output.starts_with("\x1b[33mWARN \x1b[0m unrecognized color \"chartreuse\""));

    // Diagnostics raised while rendering a message's markup are not logged
    // through the same logger again.
    log::info!("[bold]unterminated");
    log::info!("[chartreuse]x[/]");
    log::logger().flush();
    assert_eq!(
        buffer.take(),
        "\x1b[32mINFO \x1b[0m [bold]unterminated\n\
         \x1b[32mINFO \x1b[0m \x1b[37mx\x1b[0m\n"
    );
}
