//! Macros for user-facing output and logging.
//!
//! Every command reports through these macros instead of calling `println!`
//! directly. Each macro takes a [`Message`](super::Message) (or anything
//! `Display`) and routes it one of two ways:
//!
//! - **Normal mode**: plain `println!`/`eprintln!` with an emoji prefix
//! - **Debug mode**: the matching `tracing` level, so output lines carry
//!   timestamps and targets
//!
//! ## Debug Mode Detection
//!
//! Debug mode is on when either variable is set, whatever its value:
//! - **`TIMEKIT_DEBUG`**: application-specific switch
//! - **`RUST_LOG`**: standard filter, also read by the subscriber in `main`
//!
//! The check runs once per process. A detached waker inherits the
//! environment of the command that armed it, but its standard streams are
//! closed, so its messages go nowhere in either mode.
//!
//! ## Output Routing
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Macro Call    │    │   Debug Mode    │    │     Output      │
//! │   msg_info!()   │───▶│   Detection     │───▶│     Routing     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!          │                       │                       │
//!          ▼                       ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ Message Content │    │ TIMEKIT_DEBUG   │    │ tracing::info!  │
//! │ + Level Prefix  │    │ or RUST_LOG?    │    │ OR println!     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Macro Categories
//!
//! ### Display
//! - **`msg_print!`**: plain line, no prefix
//! - **`msg_success!`**: ✅ completed action (timer started, removed)
//! - **`msg_info!`**: ℹ️ neutral status (no timers, nothing to clear)
//! - **`msg_warning!`**: ⚠️ recovered problem (corrupt store, failed wake-up)
//!
//! ### Errors
//! - **`msg_error!`**: ❌ on stderr, for failures the command reports and
//!   swallows
//! - **`msg_error_anyhow!`**: builds an `anyhow::Error`
//! - **`msg_bail_anyhow!`**: returns early with that error
//!
//! ### Debug
//! - **`msg_debug!`**: 🔍 only in debug mode, silent otherwise
//!
//! Every display macro accepts a second `true` argument that surrounds the
//! line with blank lines.
//!
//! ## Usage Examples
//!
//! ```rust
//! use timekit::libs::messages::Message;
//! use timekit::{msg_debug, msg_info, msg_success};
//!
//! msg_success!(Message::TimerRemoved("3".to_string()));
//! msg_info!(Message::NoTimers, true);
//! msg_debug!(format!("Waker armed for {}", "3"));
//! ```
//!
//! ```rust
//! use anyhow::Result;
//! use timekit::libs::messages::Message;
//! use timekit::msg_bail_anyhow;
//!
//! fn parse_fire_time(value: &str) -> Result<()> {
//!     if value.is_empty() {
//!         msg_bail_anyhow!(Message::InvalidFireTime(value.to_string()));
//!     }
//!     Ok(())
//! }
//! # assert!(parse_fire_time("").is_err());
//! ```

use std::sync::OnceLock;

/// Cached result of [`is_debug_mode`].
static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Whether messages go to `tracing` instead of the plain console.
///
/// True when `TIMEKIT_DEBUG` or `RUST_LOG` is present in the environment.
/// The variables are read on the first call only; later changes to the
/// environment do not switch modes.
///
/// # Examples
///
/// ```rust
/// use timekit::libs::messages::macros::is_debug_mode;
///
/// let first = is_debug_mode();
/// assert_eq!(is_debug_mode(), first);
/// ```
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("TIMEKIT_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a message without prefix.
///
/// Used for tables and other preformatted output. Pass `true` as a second
/// argument to surround it with blank lines.
///
/// # Examples
///
/// ```rust
/// use timekit::libs::messages::Message;
/// use timekit::msg_print;
///
/// msg_print!(Message::TimersHeader);
/// msg_print!("plain text", true);
/// ```
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

/// Prints a success message with ✅ prefix.
///
/// Logged at `info` level in debug mode.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

/// Prints an error message with ❌ prefix to stderr.
///
/// For failures the command reports and then carries on or exits cleanly.
/// Failures that should end the process with an error go through
/// [`msg_bail_anyhow!`] instead.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("\n❌ {}\n", $msg);
        } else {
            eprintln!("\n❌ {}\n", $msg);
        }
    };
}

/// Prints a warning with ⚠️ prefix.
///
/// Used for conditions the command recovers from, such as an unreadable
/// timer store or a notification the desktop refused.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("\n⚠️ {}\n", $msg);
        } else {
            println!("\n⚠️ {}\n", $msg);
        }
    };
}

/// Prints an informational message with ℹ️ prefix.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️ {}\n", $msg);
        } else {
            println!("\nℹ️ {}\n", $msg);
        }
    };
}

/// Debug-only message with 🔍 prefix; silent in normal mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Builds an `anyhow::Error` from a message.
///
/// # Examples
///
/// ```rust
/// use timekit::libs::messages::Message;
/// use timekit::msg_error_anyhow;
///
/// let error = msg_error_anyhow!(Message::WakeupNotSupported);
/// assert!(error.to_string().starts_with("❌ "));
/// ```
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

/// Returns early with an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
