//! Foreground countdown.
//!
//! Unlike `start`, nothing is stored or scheduled: the command holds the
//! terminal for the whole duration, ticking once a second, and can only be
//! stopped by interrupting the process.

use crate::libs::config::Config;
use crate::libs::duration::parse_duration;
use crate::libs::formatter::{elapsed_fraction, format_clock, progress_bar};
use crate::libs::messages::Message;
use crate::libs::notifier::{DesktopNotifier, Notification, Notifier};
use crate::libs::timer::DEFAULT_MESSAGE;
use crate::{msg_error, msg_success};
use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

const BAR_WIDTH: usize = 30;

#[derive(Debug, Args)]
pub struct CountdownArgs {
    /// Duration (`25m`, `1h30m`, `90`)
    duration: String,
    /// Text shown when the countdown ends
    message: Option<String>,
}

pub fn cmd(args: CountdownArgs) -> Result<()> {
    let total = parse_duration(&args.duration);
    if total <= 0 {
        msg_error!(Message::InvalidTimeFormat(args.duration));
        return Ok(());
    }
    let message = args.message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string());

    let started = Instant::now();
    let mut stdout = io::stdout();
    loop {
        let remaining = total - started.elapsed().as_secs() as i64;
        write!(
            stdout,
            "\r{} {} ",
            progress_bar(elapsed_fraction(total, remaining), BAR_WIDTH),
            format_clock(remaining)
        )?;
        stdout.flush()?;
        if remaining <= 0 {
            break;
        }
        thread::sleep(Duration::from_secs(1));
    }
    writeln!(stdout)?;

    let sound = Config::read().map(|c| c.timer_settings().sound).unwrap_or(true);
    DesktopNotifier::new(sound).notify(&Notification {
        title: Message::CountdownTitle.to_string(),
        body: message.clone(),
        is_final: true,
    });
    msg_success!(Message::CountdownFinished(message));
    Ok(())
}
