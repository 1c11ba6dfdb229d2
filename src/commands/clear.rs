use super::report;
use crate::libs::manager::TimerManager;
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let mut manager = TimerManager::open()?;
    // Pick up timers whose wake-up was lost so they are cleared too.
    if let Err(e) = manager.reconcile() {
        return report(e);
    }

    match manager.clear() {
        Ok(0) => msg_info!(Message::NothingToClear),
        Ok(count) => msg_success!(Message::TimersCleared(count)),
        Err(e) => return report(e),
    }
    Ok(())
}
