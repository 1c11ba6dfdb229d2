#[cfg(test)]
mod tests {
    use chrono::Duration;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timekit::db::timers::Timers;
    use timekit::libs::config::Config;
    use timekit::libs::manager::TimerManager;
    use timekit::libs::notifier::SilentNotifier;
    use timekit::libs::scheduler::{ManualScheduler, Scheduler};
    use timekit::libs::timer::{Repeat, TimerMode, TimerState};

    type Manager = TimerManager<ManualScheduler, SilentNotifier>;

    struct WakeupTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl TestContext for WakeupTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join("timers.json");
            WakeupTestContext { _temp_dir: temp_dir, path }
        }
    }

    impl WakeupTestContext {
        fn manager(&self) -> Manager {
            TimerManager::new(Timers::at(&self.path), ManualScheduler::new(), SilentNotifier::new(), &Config::default())
        }
    }

    /// Fires the wake-up currently armed for `id`.
    fn fire(manager: &mut Manager, id: &str) -> Option<timekit::libs::notifier::Notification> {
        let armed = manager.scheduler().fire_time(id);
        assert!(armed.is_some(), "timer {} has no wake-up", id);
        manager.handle_wakeup(id, armed).unwrap()
    }

    #[test_context(WakeupTestContext)]
    #[test]
    fn test_single_run_completes(ctx: &mut WakeupTestContext) {
        let mut manager = ctx.manager();
        manager.start("5m", Some("Tea is ready"), 1).unwrap();

        let notification = fire(&mut manager, "1").unwrap();
        assert!(notification.is_final);
        assert_eq!(notification.body, "Tea is ready");
        assert_eq!(notification.title, "Timer 1");

        let timer = manager.timers()[0].clone();
        assert_eq!(timer.state, TimerState::Completed);
        assert!(!manager.scheduler().is_armed("1"));
        assert_eq!(manager.notifier().sent(), vec![notification]);
    }

    #[test_context(WakeupTestContext)]
    #[test]
    fn test_repeat_advances_then_completes(ctx: &mut WakeupTestContext) {
        let mut manager = ctx.manager();
        let started = manager.start("1m", Some("Drink water"), 2).unwrap();

        let first = fire(&mut manager, "1").unwrap();
        assert!(!first.is_final);
        assert_eq!(first.body, "Drink water (1/2)");

        let timer = manager.timers()[0].clone();
        assert_eq!(timer.state, TimerState::Running);
        assert_eq!(timer.mode, TimerMode::Repeat(Repeat { total: 2, remaining: 0, current_run: 2 }));
        let restart = timer.start_time.unwrap();
        assert!(restart >= started.start_time.unwrap());
        assert_eq!(timer.end_time, Some(restart + Duration::seconds(60)));
        assert_eq!(manager.scheduler().fire_time("1"), timer.end_time);

        let last = fire(&mut manager, "1").unwrap();
        assert!(last.is_final);
        assert_eq!(last.body, "Drink water (all 2 runs done)");
        assert_eq!(manager.timers()[0].state, TimerState::Completed);
        assert!(!manager.scheduler().is_armed("1"));
        assert_eq!(manager.notifier().sent().len(), 2);
    }

    #[test_context(WakeupTestContext)]
    #[test]
    fn test_sequence_walks_phases(ctx: &mut WakeupTestContext) {
        let mut manager = ctx.manager();
        manager.start("(1m a, 2m b)x2", None, 1).unwrap();

        let notification = fire(&mut manager, "1").unwrap();
        assert!(!notification.is_final);
        assert_eq!(notification.body, "a done. Next: b for 2m (2/4)");

        let timer = manager.timers()[0].clone();
        assert_eq!(timer.seconds, 120);
        assert_eq!(timer.duration, "2m");
        assert_eq!(timer.label(), "b");
        assert_eq!(timer.end_time, Some(timer.start_time.unwrap() + Duration::seconds(120)));

        fire(&mut manager, "1").unwrap();
        fire(&mut manager, "1").unwrap();
        let timer = manager.timers()[0].clone();
        assert_eq!(timer.sequence_state().unwrap().current_phase, 3);

        let last = fire(&mut manager, "1").unwrap();
        assert!(last.is_final);
        assert_eq!(last.body, "Sequence complete! (4 phases)");
        let timer = manager.timers()[0].clone();
        assert_eq!(timer.state, TimerState::Completed);
        assert_eq!(timer.sequence_state().unwrap().current_phase, 4);
        assert!(!manager.scheduler().is_armed("1"));
    }

    #[test_context(WakeupTestContext)]
    #[test]
    fn test_stale_wakeups_are_ignored(ctx: &mut WakeupTestContext) {
        let mut manager = ctx.manager();
        let started = manager.start("5m", None, 1).unwrap();
        let end = started.end_time.unwrap();

        // Armed for an end time the record no longer has.
        assert_eq!(manager.handle_wakeup("1", Some(end - Duration::seconds(30))).unwrap(), None);
        // Unknown timer.
        assert_eq!(manager.handle_wakeup("7", Some(end)).unwrap(), None);

        // Paused in the meantime.
        manager.pause("1").unwrap();
        assert_eq!(manager.handle_wakeup("1", Some(end)).unwrap(), None);

        let timer = manager.timers()[0].clone();
        assert_eq!(timer.state, TimerState::Paused);
        assert!(manager.notifier().sent().is_empty());
    }

    #[test_context(WakeupTestContext)]
    #[test]
    fn test_wakeup_without_expected_end(ctx: &mut WakeupTestContext) {
        let mut manager = ctx.manager();
        manager.start("5m", None, 1).unwrap();

        let notification = manager.handle_wakeup("1", None).unwrap().unwrap();
        assert!(notification.is_final);
        assert_eq!(manager.timers()[0].state, TimerState::Completed);
    }
}
