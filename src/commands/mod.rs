pub mod clear;
pub mod countdown;
pub mod fire;
pub mod init;
pub mod list;
pub mod pause;
pub mod presets;
pub mod remove;
pub mod resume;
pub mod start;
pub mod watch;

use crate::libs::error::TimerError;
use crate::msg_error;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Start a timer or an interval sequence", arg_required_else_help = true)]
    Start(start::StartArgs),
    #[command(about = "List timers")]
    List(list::ListArgs),
    #[command(about = "Pause a running timer, or all of them")]
    Pause(pause::PauseArgs),
    #[command(about = "Resume a paused or lost timer, or all of them")]
    Resume(resume::ResumeArgs),
    #[command(about = "Remove a timer, all timers, or finished ones", arg_required_else_help = true)]
    Remove(remove::RemoveArgs),
    #[command(about = "Remove completed and lost timers")]
    Clear,
    #[command(about = "Run a countdown in the foreground", arg_required_else_help = true)]
    Countdown(countdown::CountdownArgs),
    #[command(about = "Show configured sequence presets")]
    Presets,
    #[command(name = "fire", hide = true)]
    Fire(fire::FireArgs),
}

const FILES_HELP: &str = "\
Files:
  Timers, config.json and waker PID files live in the per-user data directory:
    Linux    ~/.local/share/timekit/timers.json
    macOS    ~/Library/Application Support/timekit/timers.json
    Windows  %LOCALAPPDATA%\\timekit\\timers.json";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, after_help = FILES_HELP)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Start(args) => start::cmd(args),
            Commands::List(args) => list::cmd(args).await,
            Commands::Pause(args) => pause::cmd(args),
            Commands::Resume(args) => resume::cmd(args),
            Commands::Remove(args) => remove::cmd(args),
            Commands::Clear => clear::cmd(),
            Commands::Countdown(args) => countdown::cmd(args),
            Commands::Presets => presets::cmd(),
            Commands::Fire(args) => fire::cmd(args).await,
        }
    }
}

/// Reports user-facing timer errors and passes storage failures on.
pub(crate) fn report(error: TimerError) -> Result<()> {
    match error {
        TimerError::Storage(e) => Err(e),
        other => {
            msg_error!(other);
            Ok(())
        }
    }
}
