//! Time formatting utilities for user-friendly display.
//!
//! Timers keep all arithmetic in whole seconds; this module turns those
//! seconds back into text for tables, the watch screen and notifications.
//!
//! ## Formats
//!
//! - **Clock**: `MM:SS` under an hour, `H:MM:SS` from an hour up
//! - **Human**: the canonical duration syntax (`1h20m`, `5m30s`, `45s`)
//! - **Progress bar**: fixed-width bar of `█` and `░` cells
//!
//! Negative inputs are clamped to zero; formatting never fails.
//!
//! ## Examples
//!
//! ```rust
//! use timekit::libs::formatter::{format_clock, format_human, progress_bar};
//!
//! assert_eq!(format_clock(3725), "1:02:05");
//! assert_eq!(format_human(5400), "1h30m");
//! assert_eq!(progress_bar(0.5, 4), "██░░");
//! ```

/// Formats seconds as a countdown clock.
pub fn format_clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Formats seconds in the same `h/m/s` syntax the duration parser accepts.
pub fn format_human(seconds: i64) -> String {
    let seconds = seconds.max(0);
    if seconds == 0 {
        return "0s".to_string();
    }

    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if mins > 0 {
        out.push_str(&format!("{}m", mins));
    }
    if secs > 0 {
        out.push_str(&format!("{}s", secs));
    }
    out
}

/// Renders a progress bar `width` cells wide for a completion fraction.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Completion fraction of an interval given its length and what is left.
pub fn elapsed_fraction(total: i64, remaining: i64) -> f64 {
    if total <= 0 {
        return 1.0;
    }
    let done = (total - remaining.clamp(0, total)) as f64;
    done / total as f64
}
