//! User-facing terminal messages. Diagnostics go through `tracing` instead.

use ansi_term::{Colour, Style};
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Blue.bold().paint(ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Green.bold().paint(ICON_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Yellow.bold().paint(ICON_WARN), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", Colour::Red.bold().paint(ICON_ERR), msg);
}

/// Section header above a report table.
pub fn header<T: fmt::Display>(msg: T) {
    println!();
    println!("{}", Colour::Green.bold().paint(format!("== {msg} ==")));
}

/// One headline metric, label dimmed and value bold.
pub fn metric<T: fmt::Display>(label: &str, value: T) {
    println!(
        "  {} {}",
        Style::new().dimmed().paint(format!("{label:<26}")),
        Style::new().bold().paint(value.to_string())
    );
}
