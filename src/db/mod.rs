//! Persistence layer.
//!
//! Timers are stored as a single JSON document; see [`timers::Timers`].

pub mod timers;
