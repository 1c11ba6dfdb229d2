use super::report;
use crate::libs::formatter::format_clock;
use crate::libs::manager::{TimerManager, TARGET_ALL};
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct PauseArgs {
    /// Timer ID, or `all`
    #[arg(default_value = TARGET_ALL)]
    target: String,
}

pub fn cmd(args: PauseArgs) -> Result<()> {
    let mut manager = TimerManager::open()?;

    if args.target.trim() == TARGET_ALL {
        match manager.pause_all() {
            Ok(0) => msg_info!(Message::NoRunningTimers),
            Ok(count) => msg_success!(Message::TimersPausedCount(count)),
            Err(e) => return report(e),
        }
        return Ok(());
    }

    match manager.pause(&args.target) {
        Ok(timer) => {
            msg_success!(Message::TimerPaused(timer.id, format_clock(timer.remaining_seconds.unwrap_or(0))));
            Ok(())
        }
        Err(e) => report(e),
    }
}
