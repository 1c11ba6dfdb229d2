//! Display implementation for timekit messages.
//!
//! All user-facing text lives here, so commands only decide *which* message
//! to show and the wording stays in one place.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TIMER MESSAGES ===
            Message::TimerStarted(id, duration, ends) => {
                format!("Timer {} started for {} (ends at {})", id, duration, ends)
            }
            Message::TimerRepeats(total) => format!("Repeats {} times", total),
            Message::TimerPaused(id, left) => format!("Timer {} paused with {} left", id, left),
            Message::TimerResumed(id, ends) => format!("Timer {} resumed (ends at {})", id, ends),
            Message::TimerCompletedOnResume(id) => {
                format!("Timer {} had no time left and is now completed", id)
            }
            Message::TimerRemoved(id) => format!("Timer {} removed", id),
            Message::TimersRemovedAll(count) => format!("Removed all {} timer(s)", count),
            Message::TimersCleared(count) => format!("Cleared {} finished timer(s)", count),
            Message::TimersPausedCount(count) => format!("Paused {} timer(s)", count),
            Message::TimersResumedCount(count) => format!("Resumed {} timer(s)", count),
            Message::TimerMarkedLost(id) => format!("Timer {} lost its wake-up and was marked lost", id),
            Message::NoTimers => "No timers found.".to_string(),
            Message::NoActiveTimers => "No active timers.".to_string(),
            Message::NoRunningTimers => "No running timers to pause.".to_string(),
            Message::NoPausedTimers => "No paused timers to resume.".to_string(),
            Message::NothingToClear => "Nothing to clear.".to_string(),
            Message::TimersHeader => "Timers:".to_string(),
            Message::ConfirmRemoveAll(count) => format!("Remove all {} timer(s)?", count),
            Message::OperationCancelled => "Operation cancelled.".to_string(),

            // === SEQUENCE MESSAGES ===
            Message::SequenceStarted(id, phases, description, total) => format!(
                "Sequence {} started: {} phase(s), {} (total {})",
                id, phases, description, total
            ),
            Message::SequenceFirstPhase(label, duration, ends) => {
                format!("First phase: {} for {} (ends at {})", label, duration, ends)
            }
            Message::PresetsHeader => "Presets:".to_string(),
            Message::NoPresets => "No presets configured.".to_string(),

            // === COUNTDOWN MESSAGES ===
            Message::CountdownTitle => "Countdown finished".to_string(),
            Message::CountdownFinished(message) => message.clone(),

            // === WATCH MESSAGES ===
            Message::WatchHeader(time) => format!("Timers ({})", time),
            Message::WatchHint => "Press q or Esc to quit".to_string(),
            Message::WatchStopped => "Watch stopped.".to_string(),

            // === NOTIFICATION MESSAGES ===
            Message::NotificationTitle(id) => format!("Timer {}", id),
            Message::NotifyRunComplete(message, run, total) => format!("{} ({}/{})", message, run, total),
            Message::NotifyAllRunsComplete(message, total) => format!("{} (all {} runs done)", message, total),
            Message::NotifyPhaseComplete(finished, next, duration, index, total) => format!(
                "{} done. Next: {} for {} ({}/{})",
                finished, next, duration, index, total
            ),
            Message::NotifySequenceComplete(message, phases) => format!("{} ({} phases)", message, phases),
            Message::NotificationFailed(e) => format!("Desktop notification failed: {}", e),

            // === WAKE-UP MESSAGES ===
            Message::WakeupArmed(id, time) => format!("Wake-up for timer {} armed at {}", id, time),
            Message::WakeupDisarmed(id) => format!("Wake-up for timer {} disarmed", id),
            Message::WakeupWaiting(id, time) => format!("Waiting until {} to fire timer {}", time, id),
            Message::WakeupStale(id) => format!("Ignoring stale wake-up for timer {}", id),
            Message::WakeupArmFailed(id, e) => format!("Failed to arm wake-up for timer {}: {}", id, e),
            Message::WakeupDisarmFailed(id, e) => {
                format!("Failed to disarm wake-up for timer {}: {}", id, e)
            }
            Message::WakeupNotSupported => "Background wake-ups are not supported on this platform".to_string(),
            Message::InvalidFireTime(value) => format!("Invalid fire time: {}", value),

            // === CONFIG MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed, defaults will be used".to_string(),
            Message::ConfigModuleTimers => "Timer settings".to_string(),
            Message::ConfigModulePresets => "Sequence presets".to_string(),
            Message::PromptIdMode => "Timer ID style".to_string(),
            Message::PromptSound => "Ring the terminal bell on alerts?".to_string(),
            Message::PromptWatchInterval => "Watch refresh interval (ms)".to_string(),
            Message::PromptAddPreset => "Add a preset?".to_string(),
            Message::PromptPresetName => "Preset name".to_string(),
            Message::PromptPresetPattern => "Sequence pattern".to_string(),

            // === ERROR MESSAGES ===
            Message::InvalidTimeFormat(value) => format!(
                "Invalid time format: '{}'. Use e.g. 25m, 1h30m, 90s or a sequence like (25m work, 5m break)x4",
                value
            ),
            Message::TimerIdRequired => "Timer ID is required".to_string(),
            Message::TimerNotFound(id) => format!("Timer {} not found", id),
            Message::TimerInvalidState(id, state) => format!("Timer {} is {}", id, state),
            Message::TimerStoreCorrupt(path) => {
                format!("Timer store {} is unreadable, starting with an empty list", path)
            }
        };
        write!(f, "{}", text)
    }
}
