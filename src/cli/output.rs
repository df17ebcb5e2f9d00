//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying progress bars,
//! status lines, and formatted errors to the user.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{FeedsmithError, ResolverError};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Output settings derived from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Only errors reach the terminal
    pub quiet: bool,
}

impl OutputConfig {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Make these settings visible to every printing helper
    pub fn apply_global(self) {
        QUIET.store(self.quiet, Ordering::Relaxed);
    }
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    if is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Create a progress bar for downloads; the length is set once known
pub fn create_download_bar() -> ProgressBar {
    if is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░"),
    );
    pb
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

pub fn print_success(message: &str) {
    if !is_quiet() {
        println!("{} {message}", status::SUCCESS);
    }
}

pub fn print_info(message: &str) {
    if !is_quiet() {
        println!("{} {message}", status::INFO);
    }
}

/// Indented detail line under a status message
pub fn print_detail(message: &str) {
    if !is_quiet() {
        println!("  {message}");
    }
}

/// Print an error and its causes to stderr.
///
/// An unresolved selector is followed by every configured profile.
pub fn display_error(error: &anyhow::Error) {
    let mut previous = error.to_string();
    eprintln!("{} Error: {previous}", status::ERROR);
    for cause in error.chain().skip(1) {
        let text = cause.to_string();
        if !previous.ends_with(&text) {
            eprintln!("  Caused by: {text}");
        }
        previous = text;
    }

    if let Some(FeedsmithError::Resolver(ResolverError::NoMatch { available, .. })) =
        error.downcast_ref::<FeedsmithError>()
    {
        eprintln!("Available build configurations:");
        for profile in available {
            eprintln!("  - {profile}");
        }
    }
}
