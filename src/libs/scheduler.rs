//! Out-of-process wake-ups for running timers.
//!
//! A timer keeps counting after the command that started it has exited, so
//! its expiry cannot be a callback inside that process. Instead the
//! [`Scheduler`] registers a named wake-up that lives on its own; when it
//! fires, a fresh `timekit fire` process loads the state file and advances
//! the timer.
//!
//! ## Implementations
//!
//! - [`ProcessScheduler`]: spawns a detached waker process per timer and
//!   tracks it with a PID file in the data directory
//! - [`ManualScheduler`]: in-memory registrations, for tests and embedders
//!
//! Cancelling a registration that is already gone is never an error.

use crate::libs::daemon;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use sysinfo::{Pid, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System, UpdateKind};

/// Registers, queries and cancels named one-shot wake-ups.
pub trait Scheduler {
    /// Registers a wake-up for `id` at `fire_at`, replacing any pending one.
    fn arm(&self, id: &str, fire_at: DateTime<Local>) -> Result<()>;

    /// Cancels the pending wake-up for `id`, if any.
    fn disarm(&self, id: &str) -> Result<()>;

    /// Whether a wake-up for `id` is still pending.
    fn is_armed(&self, id: &str) -> bool;
}

/// Scheduler backed by detached `timekit fire` processes.
#[derive(Debug, Clone)]
pub struct ProcessScheduler {
    storage: DataStorage,
}

impl ProcessScheduler {
    pub fn new() -> Self {
        Self::with_storage(DataStorage::new())
    }

    /// Scheduler keeping its PID files in `storage`.
    pub fn with_storage(storage: DataStorage) -> Self {
        Self { storage }
    }

    fn pid_path(&self, id: &str) -> Result<PathBuf> {
        let safe_id: String = id.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_').collect();
        self.storage.get_path(&format!("waker-{}.pid", safe_id))
    }

    fn read_pid(&self, id: &str) -> Option<u32> {
        let path = self.pid_path(id).ok()?;
        fs::read_to_string(path).ok()?.trim().parse().ok()
    }
}

impl Default for ProcessScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Looks up a live waker process, ignoring zombies and reused PIDs.
fn waker_process(system: &mut System, pid: u32) -> Option<Pid> {
    let pid = Pid::from_u32(pid);
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_cmd(UpdateKind::Always),
    );
    let process = system.process(pid)?;
    if process.status() == ProcessStatus::Zombie {
        return None;
    }
    let is_waker = process.cmd().iter().any(|arg| arg.to_string_lossy() == daemon::FIRE_COMMAND);
    is_waker.then_some(pid)
}

impl Scheduler for ProcessScheduler {
    fn arm(&self, id: &str, fire_at: DateTime<Local>) -> Result<()> {
        self.disarm(id)?;
        let pid = daemon::spawn_waker(id, fire_at)?;
        fs::write(self.pid_path(id)?, pid.to_string())?;
        msg_debug!(Message::WakeupArmed(id.to_string(), fire_at.format("%H:%M:%S").to_string()));
        Ok(())
    }

    fn disarm(&self, id: &str) -> Result<()> {
        let path = self.pid_path(id)?;
        let Some(pid) = self.read_pid(id) else {
            let _ = fs::remove_file(&path);
            return Ok(());
        };

        // A waker re-arming its own timer only drops its registration.
        if pid != std::process::id() {
            let mut system = System::new();
            if let Some(process) = waker_process(&mut system, pid).and_then(|pid| system.process(pid)) {
                process.kill();
            }
        }
        let _ = fs::remove_file(&path);
        msg_debug!(Message::WakeupDisarmed(id.to_string()));
        Ok(())
    }

    fn is_armed(&self, id: &str) -> bool {
        match self.read_pid(id) {
            Some(pid) => waker_process(&mut System::new(), pid).is_some(),
            None => false,
        }
    }
}

/// Scheduler that only records registrations in memory.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    armed: Mutex<BTreeMap<String, DateTime<Local>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire time registered for `id`.
    pub fn fire_time(&self, id: &str) -> Option<DateTime<Local>> {
        self.armed.lock().get(id).copied()
    }

    pub fn armed_ids(&self) -> Vec<String> {
        self.armed.lock().keys().cloned().collect()
    }

    /// Drops a registration without going through [`Scheduler::disarm`],
    /// as when a wake-up fires or is purged externally.
    pub fn forget(&self, id: &str) {
        self.armed.lock().remove(id);
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&self, id: &str, fire_at: DateTime<Local>) -> Result<()> {
        self.armed.lock().insert(id.to_string(), fire_at);
        Ok(())
    }

    fn disarm(&self, id: &str) -> Result<()> {
        self.armed.lock().remove(id);
        Ok(())
    }

    fn is_armed(&self, id: &str) -> bool {
        self.armed.lock().contains_key(id)
    }
}

impl<S: Scheduler + ?Sized> Scheduler for &S {
    fn arm(&self, id: &str, fire_at: DateTime<Local>) -> Result<()> {
        (**self).arm(id, fire_at)
    }

    fn disarm(&self, id: &str) -> Result<()> {
        (**self).disarm(id)
    }

    fn is_armed(&self, id: &str) -> bool {
        (**self).is_armed(id)
    }
}
