//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;

/// Enable or disable colored output for the whole process
pub fn set_color(enabled: bool) {
    owo_colors::set_override(enabled);
}

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format `label: value` rows with labels padded to a common width
pub fn key_value_rows(rows: &[(&str, &str)]) -> Vec<String> {
    let width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    rows.iter()
        .map(|(k, v)| format!("{:<width$}  {}", k, v, width = width))
        .collect()
}

/// Print rows from [`key_value_rows`], dimming the labels
pub fn print_key_values(rows: &[(&str, &str)]) {
    for (line, (key, _)) in key_value_rows(rows).iter().zip(rows) {
        let (label, rest) = line.split_at(key.len());
        println!("{}{}", label.dimmed(), rest);
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
