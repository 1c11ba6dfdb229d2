use super::report;
use crate::libs::formatter::format_human;
use crate::libs::manager::TimerManager;
use crate::libs::messages::Message;
use crate::libs::sequence::summarize;
use crate::libs::timer::TimerMode;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Duration (`25m`, `1h30m`, `90`), sequence pattern or preset name
    duration: String,
    /// Text shown when the timer completes
    message: Option<String>,
    /// How many times a simple timer runs back to back
    #[arg(default_value_t = 1)]
    repeat: i64,
}

pub fn cmd(args: StartArgs) -> Result<()> {
    let mut manager = TimerManager::open()?;
    let timer = match manager.start(&args.duration, args.message.as_deref(), args.repeat) {
        Ok(timer) => timer,
        Err(e) => return report(e),
    };

    let ends = timer.end_time.map(|t| t.format("%H:%M:%S").to_string()).unwrap_or_default();
    match &timer.mode {
        TimerMode::Repeat(repeat) => {
            msg_success!(Message::TimerStarted(timer.id.clone(), timer.duration.clone(), ends));
            if repeat.total > 1 {
                msg_info!(Message::TimerRepeats(repeat.total));
            }
        }
        TimerMode::Sequence(seq) => {
            let summary = summarize(&seq.phases);
            msg_success!(Message::SequenceStarted(
                timer.id.clone(),
                summary.phase_count,
                summary.description,
                format_human(summary.total_seconds)
            ));
            msg_info!(Message::SequenceFirstPhase(seq.phase_label.clone(), timer.duration.clone(), ends));
        }
    }
    Ok(())
}
