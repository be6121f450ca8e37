//! Simple terminal output functions for the tumvol CLI.
//!
//! Every line goes through `log::info!` so that it also lands in the run log
//! when one is configured. Styling is skipped when `NO_COLOR` is set.

use console::style;
use log::{error, info, warn};
use owo_colors::OwoColorize;

const LABEL_WIDTH: usize = 15;

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a section header
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!("===== {} =====", title.to_uppercase().cyan().bold());
    } else {
        info!("===== {} =====", title.to_uppercase());
    }
    info!("");
}

/// Print a processing step
pub fn print_processing(message: &str) {
    if should_use_color() {
        info!("  » {}", style(message).bold());
    } else {
        info!("  » {message}");
    }
}

/// Print an aligned `label: value` line
pub fn print_status(label: &str, value: &str, highlight: bool) {
    let padding = LABEL_WIDTH.saturating_sub(label.len()).max(1);

    if should_use_color() && highlight {
        info!("      {}:{} {}", label, " ".repeat(padding), style(value).bold());
    } else {
        info!("      {}:{} {}", label, " ".repeat(padding), value);
    }
}

pub fn print_success(message: &str) {
    info!("");
    if should_use_color() {
        info!("  ✓ {}", message.green());
    } else {
        info!("  ✓ {message}");
    }
}

pub fn print_warning(message: &str) {
    if should_use_color() {
        warn!("  ⚠ {}", message.yellow());
    } else {
        warn!("  ⚠ {message}");
    }
}

pub fn print_error(message: &str) {
    if should_use_color() {
        error!("  ✗ {}", message.red().bold());
    } else {
        error!("  ✗ {message}");
    }
}
