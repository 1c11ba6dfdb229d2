#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timekit::libs::config::{default_presets, Config, TimerConfig, CONFIG_FILE_NAME};
    use timekit::libs::data_storage::DataStorage;
    use timekit::libs::timer::IdMode;

    /// Points the per-user data directory at a temporary home.
    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            // Mock the home/appdata directory for cross-platform compatibility.
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.timers.is_none());
        assert_eq!(config.presets, default_presets());
        assert_eq!(config.presets["pomodoro"], "(25m work, 5m break)x4");

        let settings = config.timer_settings();
        assert_eq!(settings.id_mode, IdMode::Sequential);
        assert!(settings.sound);
        assert_eq!(settings.watch_interval_ms, 1000);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"timers":{"id_mode":"random"}}"#).unwrap();
        let settings = config.timer_settings();
        assert_eq!(settings.id_mode, IdMode::Random);
        assert!(settings.sound);
        assert_eq!(settings.watch_interval_ms, 1000);
        assert_eq!(config.presets, default_presets());
    }

    // Reads and writes share one test since they go through the
    // process-wide HOME variable.
    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_and_save_config(_ctx: &mut ConfigTestContext) {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        assert!(!path.exists());
        assert_eq!(Config::read().unwrap(), Config::default());

        let mut presets = BTreeMap::new();
        presets.insert("tea".to_string(), "3m steep, 2m cool".to_string());
        let config = Config {
            timers: Some(TimerConfig {
                id_mode: IdMode::Random,
                sound: false,
                watch_interval_ms: 250,
            }),
            presets,
        };
        config.save().unwrap();
        assert!(path.exists());
        assert_eq!(Config::read().unwrap(), config);

        fs::write(&path, "not json").unwrap();
        assert!(Config::read().is_err());
    }
}
