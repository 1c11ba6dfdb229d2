use super::formatter::{elapsed_fraction, format_clock, format_human, progress_bar};
use super::sequence::{parse_sequence, summarize};
use super::timer::{Timer, TimerMode, TimerState};
use chrono::{DateTime, Local};
use prettytable::{row, Table};
use std::collections::BTreeMap;

const TABLE_BAR_WIDTH: usize = 20;
const WATCH_BAR_WIDTH: usize = 30;

pub struct View {}

impl View {
    pub fn timers(timers: &[Timer], now: DateTime<Local>) {
        let mut table = Table::new();

        table.add_row(row!["ID", "STATE", "LABEL", "PROGRESS", "LEFT", "ENDS", "RUN"]);
        for timer in timers {
            let remaining = timer.remaining_at(now);
            let ends = match (timer.state, timer.end_time) {
                (TimerState::Running, Some(end)) => end.format("%H:%M:%S").to_string(),
                _ => "-".to_string(),
            };
            table.add_row(row![
                timer.id,
                state_icon(timer.state),
                timer.label(),
                progress_bar(elapsed_fraction(timer.seconds, remaining), TABLE_BAR_WIDTH),
                format_clock(remaining),
                ends,
                run_position(timer)
            ]);
        }
        table.printstd();
    }

    pub fn presets(presets: &BTreeMap<String, String>) {
        let mut table = Table::new();

        table.add_row(row!["NAME", "PATTERN", "PHASES", "TOTAL"]);
        for (name, pattern) in presets {
            let summary = summarize(&parse_sequence(pattern));
            table.add_row(row![name, pattern, summary.description, format_human(summary.total_seconds)]);
        }
        table.printstd();
    }

    /// Lines of one watch-screen frame.
    pub fn watch_frame(timers: &[Timer], now: DateTime<Local>) -> Vec<String> {
        let mut lines = Vec::new();
        for timer in timers {
            let remaining = timer.remaining_at(now);
            lines.push(format!(
                "{} [{}] {}  {}",
                state_icon(timer.state),
                timer.id,
                timer.label(),
                run_position(timer)
            ));
            lines.push(format!(
                "    {} {} left",
                progress_bar(elapsed_fraction(timer.seconds, remaining), WATCH_BAR_WIDTH),
                format_clock(remaining)
            ));
            if let TimerMode::Sequence(seq) = &timer.mode {
                let total_left = match timer.state {
                    TimerState::Completed => 0,
                    _ => remaining + seq.seconds_after_current(),
                };
                lines.push(format!(
                    "    {} {} of {} total",
                    progress_bar(elapsed_fraction(seq.total_seconds, total_left), WATCH_BAR_WIDTH),
                    format_clock(total_left),
                    format_clock(seq.total_seconds)
                ));
            }
        }
        lines
    }
}

fn state_icon(state: TimerState) -> String {
    let icon = match state {
        TimerState::Running => "▶",
        TimerState::Paused => "⏸",
        TimerState::Completed => "✔",
        TimerState::Lost => "⚠",
    };
    format!("{} {}", icon, state)
}

/// `run 2/3` for repeating timers, `phase 4/8` for sequences.
fn run_position(timer: &Timer) -> String {
    match &timer.mode {
        TimerMode::Repeat(repeat) if repeat.total > 1 => format!("run {}/{}", repeat.current_run, repeat.total),
        TimerMode::Repeat(_) => String::new(),
        TimerMode::Sequence(seq) => {
            let shown = (seq.current_phase + 1).min(seq.total_phases());
            format!("phase {}/{}", shown, seq.total_phases())
        }
    }
}
