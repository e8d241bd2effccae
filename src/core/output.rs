//! Unified output formatting utilities for consistent CLI presentation.
//!
//! # Design Principles
//! - **Consistent color scheme**: red for errors, blue for headers, bright_black for hints
//! - **Standardized spacing**: newline before and after each block

use crate::core::{
    colors::{get_colored_side, get_colored_state},
    date_key::{date_input_value, DateKey},
    side::Side,
    sync::SyncState,
};
use colored::*;

/// Formats and prints an error message
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Error followed by a short list of hints, used for fatal startup failures
pub fn print_error_with_hints(message: &str, hints: &[&str]) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
    for hint in hints {
        println!("  {}", hint.bright_black());
    }
    println!();
}

pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.blue());
}

/// `  label  value` with the label padded to `width`
pub fn print_field(label: &str, value: impl std::fmt::Display, width: usize) {
    println!("  {}  {}", format!("{label:<width$}").bright_black(), value);
}

/// One-line summary of the rendered date, as the date input would show it
pub fn format_date_line(key: Option<&DateKey>, state: SyncState) -> String {
    let date = date_input_value(key);
    let date = match key {
        Some(_) => date.white().bold(),
        None => date.bright_black(),
    };
    format!("{date} [{}]", get_colored_state(state))
}

/// `ua 12` style count with the side colored
pub fn format_side_count(side: Side, count: usize) -> String {
    format!("{} {}", get_colored_side(side), count.to_string().white())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_functions_do_not_panic() {
        print_error("Test error message");
        print_error_with_hints("Manifest unavailable", &["check --data"]);
        print_success("Saved");
        print_info("Information message");
        print_section_header("Dates");
        print_field("zoom", 8, 10);
    }

    #[test]
    fn test_date_line_mentions_date() {
        let key = DateKey::parse("20230131").unwrap();
        let line = format_date_line(Some(&key), SyncState::Ready);
        assert!(line.contains("2023-01-31"));
        assert!(format_date_line(None, SyncState::Idle).contains("2023-01-01"));
    }

    #[test]
    fn test_side_count_mentions_count() {
        assert!(format_side_count(Side::Ru, 42).contains("42"));
    }
}
