//! # timekit - background timers for the terminal
//!
//! Start a countdown or an interval sequence from the shell and get a
//! desktop notification when it ends, without keeping a terminal open.
//!
//! ## Features
//!
//! - **Flexible durations**: `25m`, `1h30m`, `90s` or plain seconds
//! - **Sequences**: patterns like `(25m work, 5m break)x4` with nested groups
//! - **Presets**: named patterns such as `pomodoro`, extendable via `timekit init`
//! - **Repeats**: rerun a simple timer several times in a row
//! - **Pause and resume**: per timer or for all timers at once
//! - **Live view**: `timekit list --watch` redraws progress in place
//!
//! Timer state is kept in a JSON file in the per-user data directory. Each
//! running timer has a detached waker process that fires it on time.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timekit::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
