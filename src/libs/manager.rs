//! Timer operations.
//!
//! [`TimerManager`] is the per-process context every timer operation runs
//! through. It owns the store handle, the wake-up scheduler, the notifier
//! and the loaded settings, and each operation is one whole-collection
//! read-modify-write of the store:
//!
//! ```text
//! load_fresh ──▶ mutate in memory ──▶ save ──▶ arm / disarm wake-ups
//! ```
//!
//! State transitions:
//!
//! ```text
//! Running ──pause──▶ Paused ──resume──▶ Running
//! Running ──sync───▶ Lost ────resume──▶ Running
//! Running ──fire───▶ Running (next run / phase) | Completed
//! Paused | Lost ──resume with nothing left──▶ Completed
//! ```
//!
//! Scheduler failures never abort an operation: they are logged and the
//! store mutation stands. Reconciliation later catches timers whose wake-up
//! never happened.

use crate::db::timers::Timers;
use crate::libs::config::{Config, TimerConfig};
use crate::libs::duration::{parse_duration, resolve_preset};
use crate::libs::error::TimerError;
use crate::libs::formatter::format_human;
use crate::libs::messages::Message;
use crate::libs::notifier::{DesktopNotifier, Notification, Notifier};
use crate::libs::scheduler::{ProcessScheduler, Scheduler};
use crate::libs::sequence::parse_sequence;
use crate::libs::timer::{self, next_id, Timer, TimerMode, TimerState, DEFAULT_MESSAGE, DEFAULT_SEQUENCE_MESSAGE};
use crate::{msg_debug, msg_warning};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;

pub const TARGET_ALL: &str = "all";
pub const TARGET_DONE: &str = "done";

pub struct TimerManager<S: Scheduler, N: Notifier> {
    pub(crate) store: Timers,
    pub(crate) scheduler: S,
    notifier: N,
    settings: TimerConfig,
    presets: BTreeMap<String, String>,
}

impl TimerManager<ProcessScheduler, DesktopNotifier> {
    /// Opens the default store with the OS-backed scheduler and notifier.
    pub fn open() -> anyhow::Result<Self> {
        let config = Config::read()?;
        let notifier = DesktopNotifier::new(config.timer_settings().sound);
        Ok(Self::new(Timers::new()?, ProcessScheduler::new(), notifier, &config))
    }
}

impl<S: Scheduler, N: Notifier> TimerManager<S, N> {
    pub fn new(store: Timers, scheduler: S, notifier: N, config: &Config) -> Self {
        Self {
            store,
            scheduler,
            notifier,
            settings: config.timer_settings(),
            presets: config.presets.clone(),
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn settings(&self) -> &TimerConfig {
        &self.settings
    }

    /// Stored timers as they are, without reconciliation.
    pub fn timers(&mut self) -> Vec<Timer> {
        self.store.load()
    }

    /// Creates and arms a timer.
    ///
    /// `input` is a duration (`"25m"`), a sequence pattern or a preset name.
    /// `repeat` applies to simple timers only and is clamped to at least one.
    pub fn start(&mut self, input: &str, message: Option<&str>, repeat: i64) -> Result<Timer, TimerError> {
        let now = timer::now();
        let mut timers = self.store.load_fresh();
        let id = next_id(&timers, self.settings.id_mode);

        let seconds = parse_duration(input);
        let new_timer = if seconds > 0 {
            Timer::simple(id, input.trim(), seconds, message.unwrap_or(DEFAULT_MESSAGE), repeat, now)
        } else {
            let pattern = resolve_preset(input, &self.presets).trim().to_string();
            let phases = parse_sequence(&pattern);
            Timer::sequence(id, &pattern, phases, message.unwrap_or(DEFAULT_SEQUENCE_MESSAGE), now)
                .ok_or_else(|| TimerError::InvalidTimeFormat(input.to_string()))?
        };

        timers.push(new_timer.clone());
        self.store.save(&timers)?;
        self.arm(&new_timer);
        Ok(new_timer)
    }

    /// Pauses one running timer.
    pub fn pause(&mut self, id: &str) -> Result<Timer, TimerError> {
        self.update_one(id, |manager, timer, now| {
            if timer.state != TimerState::Running {
                return Err(invalid_state(timer));
            }
            manager.pause_timer(timer, now);
            Ok(())
        })
    }

    /// Pauses every running timer; returns how many were paused.
    pub fn pause_all(&mut self) -> Result<usize, TimerError> {
        self.update_all(|manager, timer, now| {
            if timer.state != TimerState::Running {
                return false;
            }
            manager.pause_timer(timer, now);
            true
        })
    }

    /// Resumes one paused or lost timer.
    pub fn resume(&mut self, id: &str) -> Result<Timer, TimerError> {
        self.update_one(id, |manager, timer, now| {
            if !matches!(timer.state, TimerState::Paused | TimerState::Lost) {
                return Err(invalid_state(timer));
            }
            manager.resume_timer(timer, now);
            Ok(())
        })
    }

    /// Resumes every paused or lost timer; returns how many were resumed.
    pub fn resume_all(&mut self) -> Result<usize, TimerError> {
        self.update_all(|manager, timer, now| {
            if !matches!(timer.state, TimerState::Paused | TimerState::Lost) {
                return false;
            }
            manager.resume_timer(timer, now);
            true
        })
    }

    /// Removes one timer, every timer (`"all"`) or finished ones (`"done"`).
    ///
    /// Returns the number of records removed.
    pub fn remove(&mut self, target: &str) -> Result<usize, TimerError> {
        let target = target.trim();
        match target {
            "" => Err(TimerError::MissingId),
            TARGET_ALL => {
                let timers = self.store.load_fresh();
                for timer in &timers {
                    self.disarm(&timer.id);
                }
                self.store.save(&[])?;
                Ok(timers.len())
            }
            TARGET_DONE => self.clear(),
            id => {
                let mut timers = self.store.load_fresh();
                let index = timers.iter().position(|t| t.id == id).ok_or_else(|| TimerError::NotFound(id.to_string()))?;
                self.disarm(id);
                timers.remove(index);
                self.store.save(&timers)?;
                Ok(1)
            }
        }
    }

    /// Removes completed and lost timers, keeping the rest in order.
    pub fn clear(&mut self) -> Result<usize, TimerError> {
        let mut timers = self.store.load_fresh();
        let before = timers.len();
        timers.retain(|t| matches!(t.state, TimerState::Running | TimerState::Paused));
        let removed = before - timers.len();
        if removed > 0 {
            self.store.save(&timers)?;
        }
        Ok(removed)
    }

    /// Handles a fired wake-up for `id`.
    ///
    /// Runs in the waker process. `expected_end` is the end time the wake-up
    /// was armed for; a record that no longer matches it (paused, resumed,
    /// removed since) is left alone and `None` is returned. Otherwise the
    /// record advances to its next run or phase, or completes, is saved, the
    /// next wake-up is armed, and the alert is raised last.
    pub fn handle_wakeup(&mut self, id: &str, expected_end: Option<DateTime<Local>>) -> Result<Option<Notification>, TimerError> {
        let now = timer::now();
        let mut timers = self.store.load_fresh();
        let Some(timer) = timers.iter_mut().find(|t| t.id == id) else {
            msg_debug!(Message::WakeupStale(id.to_string()));
            return Ok(None);
        };
        if timer.state != TimerState::Running || expected_end.is_some_and(|end| timer.end_time != Some(end)) {
            msg_debug!(Message::WakeupStale(id.to_string()));
            return Ok(None);
        }

        let notification = advance(timer, now);
        let next = timer.clone();
        self.store.save(&timers)?;

        if next.state == TimerState::Running {
            self.arm(&next);
        } else {
            self.disarm(&next.id);
        }
        self.notifier.notify(&notification);
        Ok(Some(notification))
    }

    fn pause_timer(&self, timer: &mut Timer, now: DateTime<Local>) {
        self.disarm(&timer.id);
        let remaining = match timer.end_time {
            Some(end) => (end - now).num_seconds().max(0),
            None => timer.seconds,
        };
        timer.state = TimerState::Paused;
        timer.remaining_seconds = Some(remaining);
    }

    fn resume_timer(&self, timer: &mut Timer, now: DateTime<Local>) {
        let remaining = timer.remaining_seconds.unwrap_or(0);
        if remaining > 0 {
            timer.run_for(remaining, now);
            self.arm(timer);
        } else {
            complete(timer);
        }
    }

    fn update_one<F>(&mut self, id: &str, apply: F) -> Result<Timer, TimerError>
    where
        F: FnOnce(&Self, &mut Timer, DateTime<Local>) -> Result<(), TimerError>,
    {
        let id = id.trim();
        if id.is_empty() {
            return Err(TimerError::MissingId);
        }

        let now = timer::now();
        let mut timers = self.store.load_fresh();
        let timer = timers.iter_mut().find(|t| t.id == id).ok_or_else(|| TimerError::NotFound(id.to_string()))?;
        apply(self, timer, now)?;
        let updated = timer.clone();
        self.store.save(&timers)?;
        Ok(updated)
    }

    fn update_all<F>(&mut self, mut apply: F) -> Result<usize, TimerError>
    where
        F: FnMut(&Self, &mut Timer, DateTime<Local>) -> bool,
    {
        let now = timer::now();
        let mut timers = self.store.load_fresh();
        let mut count = 0;
        for timer in timers.iter_mut() {
            if apply(self, timer, now) {
                count += 1;
            }
        }
        if count > 0 {
            self.store.save(&timers)?;
        }
        Ok(count)
    }

    fn arm(&self, timer: &Timer) {
        let Some(end) = timer.end_time else {
            return;
        };
        if let Err(e) = self.scheduler.arm(&timer.id, end) {
            msg_warning!(Message::WakeupArmFailed(timer.id.clone(), e.to_string()));
        }
    }

    fn disarm(&self, id: &str) {
        if let Err(e) = self.scheduler.disarm(id) {
            msg_warning!(Message::WakeupDisarmFailed(id.to_string(), e.to_string()));
        }
    }
}

fn invalid_state(timer: &Timer) -> TimerError {
    TimerError::InvalidState {
        id: timer.id.clone(),
        state: timer.state,
    }
}

fn complete(timer: &mut Timer) {
    timer.state = TimerState::Completed;
    timer.remaining_seconds = None;
    if let TimerMode::Sequence(seq) = &mut timer.mode {
        seq.current_phase = seq.total_phases();
    }
}

/// Moves a fired timer to its next run or phase, or completes it.
fn advance(timer: &mut Timer, now: DateTime<Local>) -> Notification {
    let title = Message::NotificationTitle(timer.id.clone()).to_string();

    match &mut timer.mode {
        TimerMode::Repeat(repeat) if repeat.remaining > 0 => {
            let body = Message::NotifyRunComplete(timer.message.clone(), repeat.current_run, repeat.total).to_string();
            repeat.remaining -= 1;
            repeat.current_run += 1;
            let seconds = timer.seconds;
            timer.run_for(seconds, now);
            Notification { title, body, is_final: false }
        }
        TimerMode::Repeat(repeat) => {
            let body = if repeat.total > 1 {
                Message::NotifyAllRunsComplete(timer.message.clone(), repeat.total).to_string()
            } else {
                timer.message.clone()
            };
            complete(timer);
            Notification { title, body, is_final: true }
        }
        TimerMode::Sequence(seq) if !seq.is_last_phase() => {
            let finished = seq.phase_label.clone();
            seq.current_phase += 1;
            let next = seq.phases[seq.current_phase].clone();
            let body = Message::NotifyPhaseComplete(
                finished,
                next.label.clone(),
                format_human(next.seconds),
                seq.current_phase + 1,
                seq.total_phases(),
            )
            .to_string();
            seq.phase_label = next.label;
            timer.seconds = next.seconds;
            timer.duration = next.duration;
            timer.run_for(next.seconds, now);
            Notification { title, body, is_final: false }
        }
        TimerMode::Sequence(seq) => {
            let body = Message::NotifySequenceComplete(timer.message.clone(), seq.total_phases()).to_string();
            complete(timer);
            Notification { title, body, is_final: true }
        }
    }
}
