#[cfg(test)]
mod tests {
    use chrono::Duration;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timekit::db::timers::Timers;
    use timekit::libs::sequence::parse_sequence;
    use timekit::libs::timer::{now, Repeat, Timer, TimerMode, TimerState, DEFAULT_MESSAGE, DEFAULT_SEQUENCE_MESSAGE};

    struct StoreTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join("timers.json");
            StoreTestContext { _temp_dir: temp_dir, path }
        }
    }

    fn sample_timers() -> Vec<Timer> {
        let start = now();
        let simple = Timer::simple("1".into(), "25m", 1500, "Stretch", 3, start);
        let mut paused = Timer::simple("2".into(), "10m", 600, DEFAULT_MESSAGE, 1, start);
        paused.state = TimerState::Paused;
        paused.remaining_seconds = Some(321);
        let pattern = "(25m work, 5m break)x2, 15m 'long break'";
        let sequence = Timer::sequence("3".into(), pattern, parse_sequence(pattern), DEFAULT_SEQUENCE_MESSAGE, start).unwrap();
        vec![simple, paused, sequence]
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_missing_file_loads_empty(ctx: &mut StoreTestContext) {
        let mut store = Timers::at(&ctx.path);
        assert!(store.load().is_empty());
        assert!(store.load_fresh().is_empty());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_round_trip_preserves_records(ctx: &mut StoreTestContext) {
        let timers = sample_timers();
        let mut store = Timers::at(&ctx.path);
        store.save(&timers).unwrap();

        let loaded = Timers::at(&ctx.path).load();
        assert_eq!(loaded, timers);
        assert_eq!(loaded[0].mode, TimerMode::Repeat(Repeat { total: 3, remaining: 2, current_run: 1 }));
        assert_eq!(loaded[1].remaining_seconds, Some(321));
        let seq = loaded[2].sequence_state().unwrap();
        assert_eq!(seq.total_phases(), 5);
        assert_eq!(seq.phases[4].label, "long break");
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_file_uses_flat_pascal_case_records(ctx: &mut StoreTestContext) {
        let mut store = Timers::at(&ctx.path);
        store.save(&sample_timers()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&ctx.path).unwrap()).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0]["Id"], "1");
        assert_eq!(records[0]["State"], "Running");
        assert_eq!(records[0]["RepeatTotal"], 3);
        assert_eq!(records[0]["IsSequence"], false);
        assert!(records[0].get("RemainingSeconds").is_none());
        assert!(records[0].get("Phases").is_none());

        assert_eq!(records[1]["RemainingSeconds"], 321);

        assert_eq!(records[2]["IsSequence"], true);
        assert_eq!(records[2]["CurrentPhase"], 0);
        assert_eq!(records[2]["TotalPhases"], 5);
        assert_eq!(records[2]["PhaseLabel"], "work");
        assert_eq!(records[2]["TotalSeconds"], 4500);
        assert_eq!(records[2]["Phases"][0]["LoopId"], "1");
        assert!(records[2]["Phases"][4].get("LoopId").is_none());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_empty_save_removes_file(ctx: &mut StoreTestContext) {
        let mut store = Timers::at(&ctx.path);
        store.save(&sample_timers()).unwrap();
        assert!(ctx.path.exists());

        store.save(&[]).unwrap();
        assert!(!ctx.path.exists());
        assert!(store.load().is_empty());

        // Saving nothing when there is nothing is fine too.
        store.save(&[]).unwrap();
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_blank_and_corrupt_files_load_empty(ctx: &mut StoreTestContext) {
        fs::write(&ctx.path, "   \n").unwrap();
        assert!(Timers::at(&ctx.path).load().is_empty());

        fs::write(&ctx.path, "{ not json").unwrap();
        assert!(Timers::at(&ctx.path).load().is_empty());

        fs::write(&ctx.path, r#"[{"Id":"1"}]"#).unwrap();
        assert!(Timers::at(&ctx.path).load().is_empty());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_absent_optional_fields_default(ctx: &mut StoreTestContext) {
        fs::write(&ctx.path, r#"[{"Id":"9","Duration":"5m","Seconds":300,"State":"Running"}]"#).unwrap();
        let loaded = Timers::at(&ctx.path).load();

        assert_eq!(loaded.len(), 1);
        let timer = &loaded[0];
        assert_eq!(timer.message, "");
        assert_eq!(timer.start_time, None);
        assert_eq!(timer.remaining_seconds, None);
        assert_eq!(timer.mode, TimerMode::Repeat(Repeat { total: 1, remaining: 0, current_run: 1 }));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_load_sees_changes_from_other_handles(ctx: &mut StoreTestContext) {
        let mut reader = Timers::at(&ctx.path);
        assert!(reader.load().is_empty());

        let mut writer = Timers::at(&ctx.path);
        let mut timers = sample_timers();
        writer.save(&timers).unwrap();
        assert_eq!(reader.load().len(), 3);

        timers.truncate(1);
        timers[0].end_time = timers[0].end_time.map(|t| t + Duration::seconds(60));
        writer.save(&timers).unwrap();
        assert_eq!(reader.load_fresh(), timers);
        assert_eq!(reader.load(), timers);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_unchanged_file_is_served_from_cache(ctx: &mut StoreTestContext) {
        let timers = sample_timers();
        let mut store = Timers::at(&ctx.path);
        store.save(&timers).unwrap();
        assert_eq!(store.load(), timers);

        // Rewrite in place with the same size and restore the mtime, so the
        // file stamp matches what the handle cached.
        let modified = fs::metadata(&ctx.path).unwrap().modified().unwrap();
        let edited = fs::read_to_string(&ctx.path).unwrap().replace("Stretch", "Strudel");
        fs::write(&ctx.path, edited).unwrap();
        fs::File::options().write(true).open(&ctx.path).unwrap().set_modified(modified).unwrap();

        assert_eq!(store.load()[0].message, "Stretch");
        assert_eq!(store.load_fresh()[0].message, "Strudel");
        assert_eq!(store.load()[0].message, "Strudel");
    }
}
