//! Waker process lifecycle.
//!
//! Each armed timer is backed by one detached `timekit fire <id> --at <time>`
//! process. It is started in its own session so closing the terminal does
//! not take it down, sleeps until the timer's end time, and then runs the
//! firing handler against the state file. It shares nothing else with the
//! process that armed it.

use crate::libs::manager::TimerManager;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_debug};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::process::{Command, Stdio};
use std::time::Duration;

/// Subcommand name the waker is started with.
pub const FIRE_COMMAND: &str = "fire";

/// Longest single sleep while waiting. Short chunks re-read the wall clock,
/// so after a suspend the waker fires on resume instead of drifting.
const MAX_SLEEP: Duration = Duration::from_secs(15);

/// Spawns a detached waker for `id`; returns its PID.
pub fn spawn_waker(id: &str, fire_at: DateTime<Local>) -> Result<u32> {
    let current_exe = std::env::current_exe()?;
    let mut command = Command::new(current_exe);
    command
        .arg(FIRE_COMMAND)
        .arg(id)
        .arg("--at")
        .arg(fire_at.to_rfc3339())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // Detach from the current session so the waker outlives the terminal.
        unsafe {
            command.pre_exec(|| {
                nix::unistd::setsid()?;
                Ok(())
            });
        }
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const DETACHED_PROCESS: u32 = 0x00000008;
        const CREATE_NEW_PROCESS_GROUP: u32 = 0x00000200;
        command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
    }

    #[cfg(not(any(unix, windows)))]
    {
        msg_bail_anyhow!(Message::WakeupNotSupported);
    }

    let child = command.spawn()?;
    Ok(child.id())
}

/// Sleeps until `fire_at` against the wall clock.
pub async fn wait_until(fire_at: DateTime<Local>) {
    loop {
        let left = (fire_at - Local::now()).to_std().unwrap_or(Duration::ZERO);
        if left.is_zero() {
            return;
        }
        tokio::time::sleep(left.min(MAX_SLEEP)).await;
    }
}

/// Body of the waker process: wait, then fire.
pub async fn run_waker(id: &str, fire_at: DateTime<Local>) -> Result<()> {
    msg_debug!(Message::WakeupWaiting(id.to_string(), fire_at.format("%H:%M:%S").to_string()));
    wait_until(fire_at).await;

    let mut manager = TimerManager::open()?;
    match manager.handle_wakeup(id, Some(fire_at)) {
        Ok(_) => Ok(()),
        Err(e) => msg_bail_anyhow!(e),
    }
}
