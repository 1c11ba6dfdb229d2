//! Configuration management for timekit.
//!
//! The configuration lives in `config.json` inside the per-user data
//! directory and is optional: when the file is absent every setting falls
//! back to its default. It has two parts:
//!
//! - **Timer settings**: how identifiers are assigned, whether alerts ring
//!   the terminal bell, and how often the watch screen refreshes
//! - **Presets**: named sequence patterns that `start` expands before
//!   parsing, e.g. `timekit start pomodoro`
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use timekit::libs::config::Config;
//!
//! let config = Config::read()?;
//! let settings = config.timer_settings();
//! println!("watch refresh: {} ms", settings.watch_interval_ms);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::timer::IdMode;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Behaviour of timers and the watch screen.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimerConfig {
    /// Sequential (`1`, `2`, ...) or random short identifiers.
    #[serde(default)]
    pub id_mode: IdMode,

    /// Ring the terminal bell alongside desktop notifications.
    #[serde(default = "default_sound")]
    pub sound: bool,

    /// Refresh interval of `list --watch`, in milliseconds.
    #[serde(default = "default_watch_interval")]
    pub watch_interval_ms: u64,
}

fn default_sound() -> bool {
    true
}

fn default_watch_interval() -> u64 {
    1000
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            id_mode: IdMode::Sequential,
            sound: default_sound(),
            watch_interval_ms: default_watch_interval(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timers: Option<TimerConfig>,

    /// Named sequence patterns.
    #[serde(default = "default_presets")]
    pub presets: BTreeMap<String, String>,
}

/// Presets available out of the box.
pub fn default_presets() -> BTreeMap<String, String> {
    [
        ("pomodoro", "(25m work, 5m break)x4"),
        ("pomodoro-long", "(25m work, 5m break)x3, 25m work, 15m 'long break'"),
        ("52-17", "(52m work, 17m break)x3"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name.to_string(), pattern.to_string()))
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timers: None,
            presets: default_presets(),
        }
    }
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn timer_settings(&self) -> TimerConfig {
        self.timers.clone().unwrap_or_default()
    }

    /// Interactive setup wizard seeded with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.timer_settings();

        msg_print!(Message::ConfigModuleTimers);
        let modes = [IdMode::Sequential, IdMode::Random];
        let mode_names = ["sequential", "random"];
        let id_mode = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptIdMode.to_string())
            .items(&mode_names)
            .default(modes.iter().position(|m| *m == default.id_mode).unwrap_or(0))
            .interact()?;

        config.timers = Some(TimerConfig {
            id_mode: modes[id_mode],
            sound: Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptSound.to_string())
                .default(default.sound)
                .interact()?,
            watch_interval_ms: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptWatchInterval.to_string())
                .default(default.watch_interval_ms)
                .interact_text()?,
        });

        msg_print!(Message::ConfigModulePresets);
        while Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptAddPreset.to_string())
            .default(false)
            .interact()?
        {
            let name: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptPresetName.to_string())
                .interact_text()?;
            let pattern: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptPresetPattern.to_string())
                .interact_text()?;
            config.presets.insert(name.trim().to_string(), pattern.trim().to_string());
        }

        Ok(config)
    }
}
