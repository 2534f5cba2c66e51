//! Terminal output.
//!
//! - `log!("styles"; "...")` prints a colored `[styles]` prefix and the message
//! - `debug!` does the same, only with `--verbose`
//! - `status_success` / `status_error` keep a single, overwritten status
//!   block for task re-runs in watch mode
//!
//! ```ignore
//! log!("size"; "styles: 2 files, 14.2 kB total");
//! debug!("watch"; "modified: {}", path.display());
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// A `log!` line was printed after the last status block, which must then stay.
static LOGGED_SINCE_STATUS: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Print `[module] message`.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// `log!`, printed only with `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

pub fn log(module: &str, message: &str) {
    let prefix = prefix(module);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();

    LOGGED_SINCE_STATUS.store(true, Ordering::SeqCst);
}

/// Server-side modules in blue, watchers green, failures red, size reports
/// magenta, tasks yellow.
fn prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module {
        "serve" | "reload" => prefix.bright_blue().bold().to_string(),
        "watch" => prefix.bright_green().bold().to_string(),
        "error" | "warning" => prefix.bright_red().bold().to_string(),
        "size" => prefix.bright_magenta().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

/// Last status block printed in watch mode.
struct WatchStatus {
    /// Terminal lines to erase before the next block.
    last_lines: usize,
}

static WATCH_STATUS: Mutex<WatchStatus> = Mutex::new(WatchStatus { last_lines: 0 });

impl WatchStatus {
    fn show(&mut self, symbol: String, message: &str) {
        let mut stdout = stdout().lock();

        let logged = LOGGED_SINCE_STATUS.swap(false, Ordering::SeqCst);
        if self.last_lines > 0 && !logged {
            let lines = u16::try_from(self.last_lines).unwrap_or(u16::MAX);
            execute!(stdout, cursor::MoveUp(lines), Clear(ClearType::FromCursorDown)).ok();
        }

        let dt = crate::utils::date::DateTimeUtc::now();
        let time = format!("[{:02}:{:02}:{:02}]", dt.hour, dt.minute, dt.second);
        writeln!(stdout, "{} {symbol} {message}", time.dimmed()).ok();
        stdout.flush().ok();

        self.last_lines = line_count(message);
    }
}

fn line_count(message: &str) -> usize {
    message.lines().count().max(1)
}

/// Replace the watch status with a success line.
pub fn status_success(message: &str) {
    WATCH_STATUS.lock().show("✓".green().to_string(), message);
}

/// Replace the watch status with a failure summary and its detail below.
pub fn status_error(summary: &str, detail: &str) {
    let message = if detail.is_empty() {
        summary.to_string()
    } else {
        format!("{summary}\n{detail}")
    };
    WATCH_STATUS.lock().show("✗".red().to_string(), &message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("styles: 2 files"), 1);
        assert_eq!(line_count("task `scripts` failed\nunexpected token\n  at main.js:5"), 3);
    }

    #[test]
    fn test_prefix_contains_module_name() {
        assert!(prefix("styles").contains("[styles]"));
        assert!(prefix("error").contains("[error]"));
    }
}
