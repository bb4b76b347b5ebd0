//! Terminal print helpers
//!
//! Thin wrappers over `colored` with a process-wide quiet switch, so the
//! workflow never reaches for ANSI codes directly.

use colored::Colorize;
use console::Term;
use std::sync::atomic::{AtomicBool, Ordering};

/// Track quiet mode state
static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable quiet mode
#[inline]
pub fn set_quiet_mode(enabled: bool) {
    QUIET_MODE.store(enabled, Ordering::Relaxed);
}

/// Check if quiet mode is enabled
#[inline]
pub fn is_quiet_mode() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

pub fn print_info(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.cyan().bold());
    }
}

pub fn print_warning(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.yellow().bold());
    }
}

pub fn print_error(message: &str) {
    // Always print errors, even in quiet mode
    eprintln!("{}", message.red().bold());
}

pub fn print_dim(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.white().dimmed());
    }
}

/// Print a simple message (respects quiet mode)
pub fn print_message(message: &str) {
    if !is_quiet_mode() {
        println!("{message}");
    }
}

/// Print an empty line (respects quiet mode)
pub fn print_newline() {
    if !is_quiet_mode() {
        println!();
    }
}

/// Print a dim horizontal rule between views
pub fn print_break() {
    if !is_quiet_mode() {
        println!("\n{}", "-".repeat(60).bright_black());
    }
}

/// Clear the whole screen before the first view
pub fn clear_screen() {
    if !is_quiet_mode() {
        let _ = Term::stdout().clear_screen();
    }
}
