#[derive(Debug, Clone)]
pub enum Message {
    // === TIMER MESSAGES ===
    TimerStarted(String, String, String), // id, duration, ends at
    TimerRepeats(u32),
    TimerPaused(String, String), // id, time left
    TimerResumed(String, String), // id, ends at
    TimerCompletedOnResume(String),
    TimerRemoved(String),
    TimersRemovedAll(usize),
    TimersCleared(usize),
    TimersPausedCount(usize),
    TimersResumedCount(usize),
    TimerMarkedLost(String),
    NoTimers,
    NoActiveTimers,
    NoRunningTimers,
    NoPausedTimers,
    NothingToClear,
    TimersHeader,
    ConfirmRemoveAll(usize),
    OperationCancelled,

    // === SEQUENCE MESSAGES ===
    SequenceStarted(String, usize, String, String), // id, phases, description, total
    SequenceFirstPhase(String, String, String),     // label, duration, ends at
    PresetsHeader,
    NoPresets,

    // === COUNTDOWN MESSAGES ===
    CountdownTitle,
    CountdownFinished(String),

    // === WATCH MESSAGES ===
    WatchHeader(String),
    WatchHint,
    WatchStopped,

    // === NOTIFICATION MESSAGES ===
    NotificationTitle(String),
    NotifyRunComplete(String, u32, u32),
    NotifyAllRunsComplete(String, u32),
    NotifyPhaseComplete(String, String, String, usize, usize), // finished, next, duration, index, total
    NotifySequenceComplete(String, usize),
    NotificationFailed(String),

    // === WAKE-UP MESSAGES ===
    WakeupArmed(String, String),
    WakeupDisarmed(String),
    WakeupWaiting(String, String),
    WakeupStale(String),
    WakeupArmFailed(String, String),
    WakeupDisarmFailed(String, String),
    WakeupNotSupported,
    InvalidFireTime(String),

    // === CONFIG MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleTimers,
    ConfigModulePresets,
    PromptIdMode,
    PromptSound,
    PromptWatchInterval,
    PromptAddPreset,
    PromptPresetName,
    PromptPresetPattern,

    // === ERROR MESSAGES ===
    InvalidTimeFormat(String),
    TimerIdRequired,
    TimerNotFound(String),
    TimerInvalidState(String, String),
    TimerStoreCorrupt(String),
}
