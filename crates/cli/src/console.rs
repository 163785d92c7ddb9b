//! User-facing progress lines.

use colored::Colorize;

/// Print a progress line
pub fn info(msg: &str) {
    println!("{}", msg.green());
}

/// Print a note about something left as it was
pub fn comment(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an error line
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg.red());
}

/// Print a plain line, e.g. a path in a listing
pub fn line(msg: &str) {
    println!("  {}", msg.dimmed());
}
