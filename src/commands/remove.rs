use super::report;
use crate::libs::manager::{TimerManager, TARGET_ALL, TARGET_DONE};
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Timer ID, `all`, or `done` for completed and lost timers
    target: String,
    /// Skip the confirmation prompt for `all`
    #[arg(long, short)]
    yes: bool,
}

pub fn cmd(args: RemoveArgs) -> Result<()> {
    let mut manager = TimerManager::open()?;
    let target = args.target.trim();

    if target == TARGET_ALL && !args.yes {
        let count = manager.timers().len();
        if count == 0 {
            msg_info!(Message::NoTimers);
            return Ok(());
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmRemoveAll(count).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    match manager.remove(target) {
        Ok(count) => {
            match target {
                TARGET_ALL => msg_success!(Message::TimersRemovedAll(count)),
                TARGET_DONE => msg_success!(Message::TimersCleared(count)),
                id => msg_success!(Message::TimerRemoved(id.to_string())),
            }
            Ok(())
        }
        Err(e) => report(e),
    }
}
