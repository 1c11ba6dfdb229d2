//! Entry point of the detached waker process.
//!
//! Started by the scheduler, never by hand: `timekit fire <id> --at <time>`.

use crate::libs::daemon;
use crate::libs::messages::Message;
use crate::msg_bail_anyhow;
use anyhow::Result;
use chrono::{DateTime, Local};
use clap::Args;

#[derive(Debug, Args)]
pub struct FireArgs {
    /// Timer ID
    id: String,
    /// RFC 3339 time the wake-up is due
    #[arg(long)]
    at: String,
}

pub async fn cmd(args: FireArgs) -> Result<()> {
    let fire_at = match DateTime::parse_from_rfc3339(&args.at) {
        Ok(time) => time.with_timezone(&Local),
        Err(_) => msg_bail_anyhow!(Message::InvalidFireTime(args.at)),
    };
    daemon::run_waker(&args.id, fire_at).await
}
