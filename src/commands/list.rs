use super::{report, watch};
use crate::libs::manager::TimerManager;
use crate::libs::messages::Message;
use crate::libs::timer::{self, Timer, TimerState};
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Include completed timers
    #[arg(long, short)]
    all: bool,
    /// Keep refreshing until `q`, `Esc` or Ctrl-C
    #[arg(long, short)]
    watch: bool,
}

pub async fn cmd(args: ListArgs) -> Result<()> {
    let mut manager = TimerManager::open()?;
    if args.watch {
        return watch::run(&mut manager, args.all).await;
    }

    let timers = match manager.reconcile() {
        Ok(timers) => visible(timers, args.all),
        Err(e) => return report(e),
    };

    if timers.is_empty() {
        msg_info!(if args.all { Message::NoTimers } else { Message::NoActiveTimers });
        return Ok(());
    }

    msg_print!(Message::TimersHeader, true);
    View::timers(&timers, timer::now());
    Ok(())
}

/// Completed timers are only shown with `--all`.
pub(crate) fn visible(timers: Vec<Timer>, all: bool) -> Vec<Timer> {
    timers.into_iter().filter(|t| all || t.state != TimerState::Completed).collect()
}
