//! Core library modules for timekit.
//!
//! ## Features
//!
//! - **Parsing**: durations, sequence patterns and presets
//! - **Timer model**: state machine, repeat and sequence bookkeeping
//! - **Lifecycle**: start, pause, resume, remove and wake-up handling
//! - **Background**: detached waker processes and desktop notifications
//! - **Presentation**: tables, progress bars and the watch screen
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timekit::libs::manager::TimerManager;
//!
//! let mut manager = TimerManager::open()?;
//! let timer = manager.start("(25m work, 5m break)x4", None, 1)?;
//! println!("started {}", timer.id);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod daemon;
pub mod data_storage;
pub mod duration;
pub mod error;
pub mod formatter;
pub mod manager;
pub mod messages;
pub mod notifier;
pub mod scheduler;
pub mod sequence;
pub mod sync;
pub mod timer;
pub mod view;
