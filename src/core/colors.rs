//! Color mapping for terminal output.
//!
//! # Color Scheme
//! - **ua**: blue
//! - **ru**: red
//! - **Ready**: green, **Loading**: yellow, **Error**: red bold, **Idle**: dimmed
//! - **Enabled layer**: green, **disabled layer**: bright_black

use crate::core::{side::Side, sync::SyncState};
use colored::*;

/// Returns a closure that paints any text in the side's color
pub fn get_side_color_style(side: Side) -> Box<dyn Fn(&str) -> ColoredString> {
    match side {
        Side::Ua => Box::new(|text: &str| text.blue()),
        Side::Ru => Box::new(|text: &str| text.red()),
    }
}

pub fn get_colored_side(side: Side) -> ColoredString {
    get_side_color_style(side)(side.as_str())
}

pub fn get_colored_state(state: SyncState) -> ColoredString {
    match state {
        SyncState::Idle => "idle".bright_black(),
        SyncState::Loading => "loading".yellow(),
        SyncState::Ready => "ready".green(),
        SyncState::Error => "error".red().bold(),
    }
}

pub fn get_colored_switch(enabled: bool) -> ColoredString {
    if enabled {
        "on ".green()
    } else {
        "off".bright_black()
    }
}
