//! Timer records and their persisted shape.
//!
//! A [`Timer`] is either a simple countdown that may repeat, or a sequence
//! that walks through a list of [`Phase`]s. The two are modelled as the
//! [`TimerMode`] tagged union; on disk they share one flat record whose
//! `IsSequence` field is the discriminant. [`TimerRecord`] is that flat
//! record and is the only type serde sees.

use super::duration::MAX_DURATION_SECONDS;
use super::manager::{TARGET_ALL, TARGET_DONE};
use super::sequence::Phase;
use chrono::{DateTime, Duration, Local, SubsecRound};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const DEFAULT_MESSAGE: &str = "Timer complete!";
pub const DEFAULT_SEQUENCE_MESSAGE: &str = "Sequence complete!";
const RANDOM_ID_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    Running,
    Paused,
    Completed,
    Lost,
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TimerState::Running => "Running",
            TimerState::Paused => "Paused",
            TimerState::Completed => "Completed",
            TimerState::Lost => "Lost",
        };
        write!(f, "{}", text)
    }
}

/// How new timer identifiers are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdMode {
    #[default]
    Sequential,
    Random,
}

/// Simple-repeat bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeat {
    pub total: u32,
    pub remaining: u32,
    pub current_run: u32,
}

impl Repeat {
    /// Bookkeeping for a fresh timer; totals below one are clamped to one.
    pub fn new(total: i64) -> Self {
        let total = total.clamp(1, u32::MAX as i64) as u32;
        Self {
            total,
            remaining: total - 1,
            current_run: 1,
        }
    }
}

/// Multi-phase progression state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub pattern: String,
    pub phases: Vec<Phase>,
    pub current_phase: usize,
    pub phase_label: String,
    pub total_seconds: i64,
}

impl Sequence {
    pub fn total_phases(&self) -> usize {
        self.phases.len()
    }

    pub fn is_last_phase(&self) -> bool {
        self.current_phase + 1 >= self.phases.len()
    }

    /// Seconds of all phases after the current one.
    pub fn seconds_after_current(&self) -> i64 {
        total_of(self.phases.iter().skip(self.current_phase + 1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerMode {
    Repeat(Repeat),
    Sequence(Sequence),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimerRecord", into = "TimerRecord")]
pub struct Timer {
    pub id: String,
    pub duration: String,
    pub seconds: i64,
    pub message: String,
    pub start_time: Option<DateTime<Local>>,
    pub end_time: Option<DateTime<Local>>,
    pub state: TimerState,
    pub remaining_seconds: Option<i64>,
    pub mode: TimerMode,
}

impl Timer {
    /// Builds a running simple timer that starts at `now`.
    pub fn simple(id: String, duration: &str, seconds: i64, message: &str, repeat: i64, now: DateTime<Local>) -> Self {
        Self {
            id,
            duration: duration.to_string(),
            seconds,
            message: message.to_string(),
            start_time: Some(now),
            end_time: end_after(now, seconds),
            state: TimerState::Running,
            remaining_seconds: None,
            mode: TimerMode::Repeat(Repeat::new(repeat)),
        }
    }

    /// Builds a running sequence timer positioned on its first phase.
    ///
    /// Returns `None` when `phases` is empty.
    pub fn sequence(id: String, pattern: &str, phases: Vec<Phase>, message: &str, now: DateTime<Local>) -> Option<Self> {
        let first = phases.first()?.clone();
        let total_seconds = total_of(phases.iter());

        Some(Self {
            id,
            duration: first.duration,
            seconds: first.seconds,
            message: message.to_string(),
            start_time: Some(now),
            end_time: end_after(now, first.seconds),
            state: TimerState::Running,
            remaining_seconds: None,
            mode: TimerMode::Sequence(Sequence {
                pattern: pattern.to_string(),
                phases,
                current_phase: 0,
                phase_label: first.label,
                total_seconds,
            }),
        })
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self.mode, TimerMode::Sequence(_))
    }

    pub fn sequence_state(&self) -> Option<&Sequence> {
        match &self.mode {
            TimerMode::Sequence(seq) => Some(seq),
            TimerMode::Repeat(_) => None,
        }
    }

    /// Label shown for the current interval.
    pub fn label(&self) -> &str {
        match &self.mode {
            TimerMode::Sequence(seq) => &seq.phase_label,
            TimerMode::Repeat(_) => &self.message,
        }
    }

    /// Starts a fresh running interval of `seconds` at `now`.
    ///
    /// `seconds` is clamped to `0..=MAX_DURATION_SECONDS`, since it may come
    /// from a hand-edited store.
    pub fn run_for(&mut self, seconds: i64, now: DateTime<Local>) {
        self.start_time = Some(now);
        self.end_time = end_after(now, seconds.clamp(0, MAX_DURATION_SECONDS));
        self.state = TimerState::Running;
        self.remaining_seconds = None;
    }

    /// Seconds left in the current interval.
    ///
    /// Live countdown while running, the snapshot otherwise.
    pub fn remaining_at(&self, now: DateTime<Local>) -> i64 {
        match self.state {
            TimerState::Running => self.end_time.map(|end| (end - now).num_seconds().max(0)).unwrap_or(0),
            TimerState::Paused | TimerState::Lost => self.remaining_seconds.unwrap_or(0).max(0),
            TimerState::Completed => 0,
        }
    }
}

/// `now` plus `seconds`, or `None` when the result is out of range.
fn end_after(now: DateTime<Local>, seconds: i64) -> Option<DateTime<Local>> {
    Duration::try_seconds(seconds).and_then(|delta| now.checked_add_signed(delta))
}

fn total_of<'a>(phases: impl Iterator<Item = &'a Phase>) -> i64 {
    phases.fold(0i64, |total, phase| total.saturating_add(phase.seconds))
}

/// Current time truncated to whole seconds.
pub fn now() -> DateTime<Local> {
    Local::now().trunc_subsecs(0)
}

/// Chooses an identifier not used by any stored timer.
pub fn next_id(timers: &[Timer], mode: IdMode) -> String {
    match mode {
        IdMode::Sequential => {
            let max = timers.iter().filter_map(|t| t.id.parse::<u64>().ok()).max().unwrap_or(0);
            (max + 1).to_string()
        }
        IdMode::Random => {
            let mut rng = rand::thread_rng();
            loop {
                let id: String = (&mut rng)
                    .sample_iter(&Alphanumeric)
                    .take(RANDOM_ID_LEN)
                    .map(|b| char::from(b).to_ascii_lowercase())
                    .collect();
                let reserved = id == TARGET_ALL || id == TARGET_DONE;
                if !reserved && !timers.iter().any(|t| t.id == id) {
                    return id;
                }
            }
        }
    }
}

/// Flat on-disk form of a [`Timer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimerRecord {
    pub id: String,
    #[serde(default)]
    pub duration: String,
    #[serde(deserialize_with = "lenient_int")]
    pub seconds: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub state: TimerState,
    #[serde(default = "one", deserialize_with = "lenient_int")]
    pub repeat_total: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub repeat_remaining: i64,
    #[serde(default = "one", deserialize_with = "lenient_int")]
    pub current_run: i64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_int")]
    pub remaining_seconds: Option<i64>,
    #[serde(default)]
    pub is_sequence: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<Phase>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_int")]
    pub current_phase: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_int")]
    pub total_phases: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_int")]
    pub total_seconds: Option<i64>,
}

fn one() -> i64 {
    1
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn to_i64(&self) -> i64 {
        match *self {
            Number::Int(n) => n,
            Number::Float(f) => f.round() as i64,
        }
    }
}

fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Number::deserialize(deserializer)?.to_i64())
}

fn lenient_opt_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(Option::<Number>::deserialize(deserializer)?.map(|n| n.to_i64()))
}

fn parse_time(text: &Option<String>) -> Option<DateTime<Local>> {
    text.as_deref()
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|t| t.with_timezone(&Local))
}

impl From<Timer> for TimerRecord {
    fn from(timer: Timer) -> Self {
        let mut record = TimerRecord {
            id: timer.id,
            duration: timer.duration,
            seconds: timer.seconds,
            message: timer.message,
            start_time: timer.start_time.map(|t| t.to_rfc3339()),
            end_time: timer.end_time.map(|t| t.to_rfc3339()),
            state: timer.state,
            repeat_total: 1,
            repeat_remaining: 0,
            current_run: 1,
            remaining_seconds: timer.remaining_seconds,
            is_sequence: false,
            sequence_pattern: None,
            phases: None,
            current_phase: None,
            total_phases: None,
            phase_label: None,
            total_seconds: None,
        };

        match timer.mode {
            TimerMode::Repeat(repeat) => {
                record.repeat_total = repeat.total as i64;
                record.repeat_remaining = repeat.remaining as i64;
                record.current_run = repeat.current_run as i64;
            }
            TimerMode::Sequence(seq) => {
                record.is_sequence = true;
                record.total_phases = Some(seq.phases.len() as i64);
                record.current_phase = Some(seq.current_phase as i64);
                record.sequence_pattern = Some(seq.pattern);
                record.phases = Some(seq.phases);
                record.phase_label = Some(seq.phase_label);
                record.total_seconds = Some(seq.total_seconds);
            }
        }

        record
    }
}

impl TryFrom<TimerRecord> for Timer {
    type Error = String;

    fn try_from(record: TimerRecord) -> Result<Self, Self::Error> {
        let mode = if record.is_sequence {
            let phases = record.phases.unwrap_or_default();
            if phases.is_empty() {
                return Err(format!("sequence timer {} has no phases", record.id));
            }
            let total_seconds = record.total_seconds.unwrap_or_else(|| total_of(phases.iter()));
            let current_phase = record.current_phase.unwrap_or(0).clamp(0, phases.len() as i64) as usize;
            let phase_label = record
                .phase_label
                .or_else(|| phases.get(current_phase).map(|p| p.label.clone()))
                .unwrap_or_default();

            TimerMode::Sequence(Sequence {
                pattern: record.sequence_pattern.unwrap_or_default(),
                phases,
                current_phase,
                phase_label,
                total_seconds,
            })
        } else {
            let total = record.repeat_total.clamp(1, u32::MAX as i64) as u32;
            TimerMode::Repeat(Repeat {
                total,
                remaining: record.repeat_remaining.clamp(0, total as i64) as u32,
                current_run: record.current_run.clamp(1, total as i64) as u32,
            })
        };

        Ok(Timer {
            start_time: parse_time(&record.start_time),
            end_time: parse_time(&record.end_time),
            id: record.id,
            duration: record.duration,
            seconds: record.seconds,
            message: record.message,
            state: record.state,
            remaining_seconds: record.remaining_seconds,
            mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::sequence::parse_sequence;

    #[test]
    fn repeat_is_clamped() {
        assert_eq!(Repeat::new(0), Repeat { total: 1, remaining: 0, current_run: 1 });
        assert_eq!(Repeat::new(-3).total, 1);
        assert_eq!(Repeat::new(3), Repeat { total: 3, remaining: 2, current_run: 1 });
    }

    #[test]
    fn simple_timer_end_matches_seconds() {
        let start = now();
        let timer = Timer::simple("1".into(), "90s", 90, DEFAULT_MESSAGE, 1, start);
        assert_eq!(timer.end_time, Some(start + Duration::seconds(90)));
        assert_eq!(timer.remaining_at(start), 90);
    }

    #[test]
    fn out_of_range_end_time_is_none() {
        let start = now();
        let timer = Timer::simple("1".into(), "huge", i64::MAX, DEFAULT_MESSAGE, 1, start);
        assert_eq!(timer.end_time, None);

        let mut timer = Timer::simple("2".into(), "1m", 60, DEFAULT_MESSAGE, 1, start);
        timer.run_for(i64::MAX, start);
        assert_eq!(timer.end_time, Some(start + Duration::seconds(MAX_DURATION_SECONDS)));
        timer.run_for(-5, start);
        assert_eq!(timer.end_time, Some(start));
    }

    #[test]
    fn sequence_total_saturates() {
        let phase = |seconds| Phase {
            seconds,
            label: "a".into(),
            duration: "x".into(),
            loop_id: None,
            loop_iteration: None,
            loop_total: None,
        };
        let phases = vec![phase(60), phase(i64::MAX), phase(i64::MAX)];
        let timer = Timer::sequence("1".into(), "p", phases, DEFAULT_SEQUENCE_MESSAGE, now()).unwrap();
        assert_eq!(timer.sequence_state().unwrap().total_seconds, i64::MAX);
        assert_eq!(timer.sequence_state().unwrap().seconds_after_current(), i64::MAX);
    }

    #[test]
    fn sequence_record_carries_fixed_repeat_fields() {
        let timer = Timer::sequence("2".into(), "(1m a, 2m b)x2", parse_sequence("(1m a, 2m b)x2"), DEFAULT_SEQUENCE_MESSAGE, now()).unwrap();
        let record = TimerRecord::from(timer);
        assert!(record.is_sequence);
        assert_eq!((record.repeat_total, record.repeat_remaining, record.current_run), (1, 0, 1));
        assert_eq!(record.total_phases, Some(4));
        assert_eq!(record.total_seconds, Some(360));
        assert_eq!(record.phase_label.as_deref(), Some("a"));
    }

    #[test]
    fn floats_are_read_as_integers() {
        let json = r#"{"Id":"1","Duration":"1m","Seconds":60.0,"Message":"m","State":"Paused",
            "RepeatTotal":2.0,"RepeatRemaining":1.0,"CurrentRun":1.0,"RemainingSeconds":12.0}"#;
        let timer: Timer = serde_json::from_str(json).unwrap();
        assert_eq!(timer.seconds, 60);
        assert_eq!(timer.remaining_seconds, Some(12));
        assert_eq!(timer.mode, TimerMode::Repeat(Repeat { total: 2, remaining: 1, current_run: 1 }));
        assert_eq!(timer.start_time, None);
    }

    #[test]
    fn unparseable_end_time_becomes_none() {
        let json = r#"{"Id":"1","Seconds":60,"State":"Running","EndTime":"not a time"}"#;
        let timer: Timer = serde_json::from_str(json).unwrap();
        assert_eq!(timer.end_time, None);
    }

    #[test]
    fn sequential_ids() {
        let start = now();
        let mut timers = Vec::new();
        assert_eq!(next_id(&timers, IdMode::Sequential), "1");
        timers.push(Timer::simple("7".into(), "1m", 60, DEFAULT_MESSAGE, 1, start));
        timers.push(Timer::simple("abcd".into(), "1m", 60, DEFAULT_MESSAGE, 1, start));
        assert_eq!(next_id(&timers, IdMode::Sequential), "8");
    }

    #[test]
    fn random_ids_avoid_stored_ones() {
        let timers = vec![Timer::simple("1".into(), "1m", 60, DEFAULT_MESSAGE, 1, now())];
        let id = next_id(&timers, IdMode::Random);
        assert_eq!(id.len(), RANDOM_ID_LEN);
        assert_ne!(id, "1");
    }
}
