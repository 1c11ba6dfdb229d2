//! Live-refreshing timer screen for `list --watch`.
//!
//! The loop is a cooperative poll: between refreshes it sleeps in short
//! steps and checks for a quit key after each one, so quitting takes at most
//! one step rather than a whole refresh interval. Every frame reconciles the
//! store first, picking up wake-ups that fired in other processes.

use super::list::visible;
use crate::libs::error::TimerError;
use crate::libs::manager::TimerManager;
use crate::libs::messages::Message;
use crate::libs::notifier::Notifier;
use crate::libs::scheduler::Scheduler;
use crate::libs::timer::{self, Timer};
use crate::libs::view::View;
use crate::msg_info;
use anyhow::Result;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;

const POLL_STEP: Duration = Duration::from_millis(100);

pub async fn run<S: Scheduler, N: Notifier>(manager: &mut TimerManager<S, N>, all: bool) -> Result<()> {
    let interval = Duration::from_millis(manager.settings().watch_interval_ms).max(POLL_STEP);
    let mut stdout = io::stdout();

    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let result = watch_loop(manager, all, interval, &mut stdout).await;
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();

    msg_info!(Message::WatchStopped);
    result
}

async fn watch_loop<S: Scheduler, N: Notifier>(manager: &mut TimerManager<S, N>, all: bool, interval: Duration, stdout: &mut Stdout) -> Result<()> {
    let steps = (interval.as_millis() / POLL_STEP.as_millis()).max(1);

    loop {
        let timers = match manager.reconcile() {
            Ok(timers) => visible(timers, all),
            Err(TimerError::Storage(e)) => return Err(e),
            Err(_) => Vec::new(),
        };
        draw(stdout, &timers)?;

        for _ in 0..steps {
            if quit_requested()? {
                return Ok(());
            }
            tokio::select! {
                _ = tokio::signal::ctrl_c() => return Ok(()),
                _ = tokio::time::sleep(POLL_STEP) => {}
            }
        }
    }
}

fn draw(stdout: &mut Stdout, timers: &[Timer]) -> Result<()> {
    let now = timer::now();
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;

    // Raw mode needs explicit carriage returns.
    write!(stdout, "{}\r\n", Message::WatchHeader(now.format("%H:%M:%S").to_string()))?;
    write!(stdout, "{}\r\n\r\n", Message::WatchHint)?;
    if timers.is_empty() {
        write!(stdout, "{}\r\n", Message::NoActiveTimers)?;
    }
    for line in View::watch_frame(timers, now) {
        write!(stdout, "{}\r\n", line)?;
    }
    stdout.flush()?;
    Ok(())
}

/// Drains pending key events; true on `q`, `Esc` or Ctrl-C.
fn quit_requested() -> Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
                _ => {}
            }
        }
    }
    Ok(false)
}
