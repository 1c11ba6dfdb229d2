#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timekit::libs::data_storage::DataStorage;
    use timekit::libs::scheduler::{ProcessScheduler, Scheduler};

    /// A PID that no live process is expected to have.
    const UNUSED_PID: u32 = u32::MAX - 1;

    struct SchedulerTestContext {
        _temp_dir: TempDir,
        dir: PathBuf,
    }

    impl TestContext for SchedulerTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let dir = temp_dir.path().join("data");
            SchedulerTestContext { _temp_dir: temp_dir, dir }
        }
    }

    impl SchedulerTestContext {
        fn scheduler(&self) -> ProcessScheduler {
            ProcessScheduler::with_storage(DataStorage::at(&self.dir))
        }

        fn write_pid(&self, file_name: &str, contents: &str) -> PathBuf {
            fs::create_dir_all(&self.dir).unwrap();
            let path = self.dir.join(file_name);
            fs::write(&path, contents).unwrap();
            path
        }

        fn files(&self) -> Vec<String> {
            let mut names: Vec<String> =
                fs::read_dir(&self.dir).unwrap().map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned()).collect();
            names.sort();
            names
        }
    }

    #[test_context(SchedulerTestContext)]
    #[test]
    fn test_disarm_without_pid_file(ctx: &mut SchedulerTestContext) {
        let scheduler = ctx.scheduler();
        assert!(scheduler.disarm("1").is_ok());
        assert!(scheduler.disarm("1").is_ok());
        assert!(!scheduler.is_armed("1"));
        assert!(ctx.files().is_empty());
    }

    #[test_context(SchedulerTestContext)]
    #[test]
    fn test_stale_pid_file_is_not_armed(ctx: &mut SchedulerTestContext) {
        let scheduler = ctx.scheduler();
        let stale = ctx.write_pid("waker-1.pid", &UNUSED_PID.to_string());
        let garbage = ctx.write_pid("waker-2.pid", "not a pid");

        assert!(!scheduler.is_armed("1"));
        assert!(!scheduler.is_armed("2"));

        scheduler.disarm("1").unwrap();
        scheduler.disarm("2").unwrap();
        assert!(!stale.exists());
        assert!(!garbage.exists());
    }

    #[test_context(SchedulerTestContext)]
    #[test]
    fn test_disarm_own_pid_only_drops_registration(ctx: &mut SchedulerTestContext) {
        let scheduler = ctx.scheduler();
        let path = ctx.write_pid("waker-1.pid", &std::process::id().to_string());

        scheduler.disarm("1").unwrap();
        // Still running, since this assertion executes.
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test_context(SchedulerTestContext)]
    #[test]
    fn test_disarm_leaves_unrelated_process_alone(ctx: &mut SchedulerTestContext) {
        let scheduler = ctx.scheduler();
        let mut child = std::process::Command::new("sleep").arg("30").spawn().unwrap();
        let path = ctx.write_pid("waker-1.pid", &child.id().to_string());

        // A live PID that does not belong to a waker is not a registration.
        assert!(!scheduler.is_armed("1"));
        scheduler.disarm("1").unwrap();
        assert!(!path.exists());
        assert!(child.try_wait().unwrap().is_none());

        child.kill().unwrap();
        child.wait().unwrap();
    }

    #[test_context(SchedulerTestContext)]
    #[test]
    fn test_ids_are_sanitized(ctx: &mut SchedulerTestContext) {
        let scheduler = ctx.scheduler();
        let sanitized = ctx.write_pid("waker-evil.pid", &UNUSED_PID.to_string());
        let kept = ctx.write_pid("waker-a_b-1.pid", &UNUSED_PID.to_string());

        scheduler.disarm("../evil").unwrap();
        assert!(!sanitized.exists());
        assert_eq!(ctx.files(), vec!["waker-a_b-1.pid"]);

        scheduler.disarm("a_b-1").unwrap();
        assert!(!kept.exists());
        assert!(ctx.files().is_empty());
    }
}
