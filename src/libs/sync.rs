//! Reconciliation of stored timers against their wake-up registrations.
//!
//! A running timer depends on a wake-up that lives outside this process.
//! If the machine slept through it, or the registration was purged, the
//! record would claim to be running forever. [`TimerManager::reconcile`]
//! finds such records and relabels them `Lost`, keeping whatever time they
//! had left so they can be resumed.
//!
//! Every listing and watch frame reconciles first, so what is shown never
//! lags behind a wake-up that fired in another process.

use crate::libs::error::TimerError;
use crate::libs::manager::TimerManager;
use crate::libs::messages::Message;
use crate::libs::notifier::Notifier;
use crate::libs::scheduler::Scheduler;
use crate::libs::timer::{self, Timer, TimerState};
use crate::msg_debug;
use chrono::{DateTime, Local};

/// Why a running record is considered lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Loss {
    /// End time passed with nothing left to fire it.
    Expired,
    /// End time missing or unreadable.
    Unreadable,
}

fn assess(timer: &Timer, now: DateTime<Local>) -> Option<Loss> {
    match timer.end_time {
        None => Some(Loss::Unreadable),
        Some(end) if end <= now => Some(Loss::Expired),
        // Still in the future: most likely a registration that has not
        // landed yet, not a lost one.
        Some(_) => None,
    }
}

impl<S: Scheduler, N: Notifier> TimerManager<S, N> {
    /// Marks running timers whose wake-up is gone as `Lost` and returns the
    /// reconciled collection. Changes are saved before returning.
    pub fn reconcile(&mut self) -> Result<Vec<Timer>, TimerError> {
        let now = timer::now();
        let timers = self.store.load();

        let suspects: Vec<(String, Option<DateTime<Local>>)> = timers
            .iter()
            .filter(|t| t.state == TimerState::Running)
            .filter(|t| !self.scheduler.is_armed(&t.id))
            .filter(|t| assess(t, now).is_some())
            .map(|t| (t.id.clone(), t.end_time))
            .collect();

        if suspects.is_empty() {
            return Ok(timers);
        }

        // A waker may have fired between the read above and the scheduler
        // query. Re-read and only demote records it has not touched.
        let mut timers = self.store.load_fresh();
        let mut changed = false;
        for timer in timers.iter_mut() {
            let untouched = suspects.iter().any(|(id, end)| *id == timer.id && *end == timer.end_time);
            if !untouched || timer.state != TimerState::Running {
                continue;
            }
            let Some(loss) = assess(timer, now) else {
                continue;
            };

            timer.state = TimerState::Lost;
            timer.remaining_seconds = Some(match loss {
                Loss::Expired => 0,
                Loss::Unreadable => timer.seconds,
            });
            msg_debug!(Message::TimerMarkedLost(timer.id.clone()));
            changed = true;
        }

        if changed {
            self.store.save(&timers)?;
        }
        Ok(timers)
    }
}
