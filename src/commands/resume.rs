use super::report;
use crate::libs::manager::{TimerManager, TARGET_ALL};
use crate::libs::messages::Message;
use crate::libs::timer::TimerState;
use crate::{msg_info, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ResumeArgs {
    /// Timer ID, or `all`
    #[arg(default_value = TARGET_ALL)]
    target: String,
}

pub fn cmd(args: ResumeArgs) -> Result<()> {
    let mut manager = TimerManager::open()?;

    if args.target.trim() == TARGET_ALL {
        match manager.resume_all() {
            Ok(0) => msg_info!(Message::NoPausedTimers),
            Ok(count) => msg_success!(Message::TimersResumedCount(count)),
            Err(e) => return report(e),
        }
        return Ok(());
    }

    match manager.resume(&args.target) {
        Ok(timer) if timer.state == TimerState::Completed => {
            msg_warning!(Message::TimerCompletedOnResume(timer.id));
            Ok(())
        }
        Ok(timer) => {
            let ends = timer.end_time.map(|t| t.format("%H:%M:%S").to_string()).unwrap_or_default();
            msg_success!(Message::TimerResumed(timer.id, ends));
            Ok(())
        }
        Err(e) => report(e),
    }
}
