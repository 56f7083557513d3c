#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDateTime};
    use parking_lot::{Mutex as EnvMutex, MutexGuard};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tidvis::db::clients::Clients;
    use tidvis::db::entries::TimeEntries;
    use tidvis::db::timers::{TimerRecord, Timers};
    use tidvis::libs::client::Client;
    use tidvis::libs::messages::Message;
    use tidvis::libs::notifier::Notify;
    use tidvis::libs::timer::{TimerError, TimerService, TimerStatus};

    // Tests share the process-wide HOME override; serialize them.
    static ENV_LOCK: EnvMutex<()> = EnvMutex::new(());

    struct TimerTestContext {
        _temp_dir: TempDir,
        _env_guard: MutexGuard<'static, ()>,
    }

    impl TestContext for TimerTestContext {
        fn setup() -> Self {
            let env_guard = ENV_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            TimerTestContext {
                _temp_dir: temp_dir,
                _env_guard: env_guard,
            }
        }
    }

    /// Notifier that records messages for assertions instead of printing.
    struct RecordingNotifier {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl Notify for RecordingNotifier {
        fn success(&self, message: Message) {
            self.messages.lock().unwrap().push(message.to_string());
        }

        fn warning(&self, message: Message) {
            self.messages.lock().unwrap().push(message.to_string());
        }

        fn error(&self, message: Message) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    fn service_for(user: &str) -> (TimerService, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let notifier = RecordingNotifier { messages: log.clone() };
        let service = TimerService::new(user.to_string(), Timers::new().unwrap(), Box::new(notifier));
        (service, log)
    }

    fn create_client(name: &str) -> i64 {
        Clients::new().unwrap().insert(&Client::new(name, None, None)).unwrap()
    }

    fn active_count(user: &str) -> i64 {
        let timers = Timers::new().unwrap();
        let count = timers
            .conn
            .lock()
            .query_row(
                "SELECT COUNT(*) FROM timers WHERE user = ?1 AND status IN ('running', 'paused')",
                [user],
                |row| row.get(0),
            )
            .unwrap();
        count
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_start_creates_running_timer(_ctx: &mut TimerTestContext) {
        let client_id = create_client("start-client");
        let (mut service, _log) = service_for("alice-start");

        let record = service.start(client_id, None, Some("refactoring".to_string())).unwrap();
        assert_eq!(record.status, TimerStatus::Running);
        assert_eq!(record.user, "alice-start");
        assert_eq!(record.client_id, client_id);
        assert_eq!(record.description.as_deref(), Some("refactoring"));
        assert!(record.end.is_none());
        assert!(record.start <= Local::now().naive_local());
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_pause_sets_marker_and_preserves_elapsed(_ctx: &mut TimerTestContext) {
        let client_id = create_client("pause-client");
        let (mut service, _log) = service_for("alice-pause");

        service.start(client_id, None, None).unwrap();
        let record = service.pause().unwrap();
        assert_eq!(record.status, TimerStatus::Paused);
        let end = record.end.expect("pause marker must be set");
        assert!(end >= record.start);
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_resume_preserves_accumulated_elapsed(_ctx: &mut TimerTestContext) {
        let client_id = create_client("resume-client");
        let (mut service, _log) = service_for("alice-resume");

        // Start, then simulate 25 minutes of accrued running time by placing
        // the pause marker 25 minutes after the stored start.
        let started = service.start(client_id, None, None).unwrap();
        Timers::new()
            .unwrap()
            .mark_paused(started.id, started.start + Duration::minutes(25))
            .unwrap();

        let resumed = service.resume().unwrap();
        assert_eq!(resumed.status, TimerStatus::Running);
        assert!(resumed.end.is_none());

        // The stored start is synthetic: now - start equals the accumulated
        // 25 minutes, no matter how much wall-clock time the pause covered.
        let elapsed = TimerService::elapsed_of(&resumed, Local::now().naive_local());
        assert_eq!(elapsed.num_minutes(), 25);

        let stopped = service.stop().unwrap();
        assert_eq!(stopped.actual_minutes, 25);
        assert_eq!(stopped.rounded_minutes, 30);
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_stop_running_timer_reports_both_durations(_ctx: &mut TimerTestContext) {
        let client_id = create_client("stop-client");
        let (mut service, _log) = service_for("alice-stop");

        // Simulate 50 minutes of runtime by moving the start back.
        let started = service.start(client_id, None, None).unwrap();
        Timers::new()
            .unwrap()
            .mark_running(started.id, Local::now().naive_local() - Duration::minutes(50))
            .unwrap();

        let stopped = service.stop().unwrap();
        assert_eq!(stopped.record.status, TimerStatus::Completed);
        assert!(stopped.record.end.is_some());
        assert_eq!(stopped.actual_minutes, 50);
        assert_eq!(stopped.rounded_minutes, 60);
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_stop_paused_timer_uses_pause_marker(_ctx: &mut TimerTestContext) {
        let client_id = create_client("stop-paused-client");
        let (mut service, _log) = service_for("alice-stop-paused");

        let started = service.start(client_id, None, None).unwrap();
        Timers::new()
            .unwrap()
            .mark_paused(started.id, started.start + Duration::minutes(17))
            .unwrap();

        let stopped = service.stop().unwrap();
        assert_eq!(stopped.actual_minutes, 17);
        assert_eq!(stopped.rounded_minutes, 30);
        assert_eq!(stopped.record.status, TimerStatus::Completed);
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_start_over_active_leaves_single_active_timer(_ctx: &mut TimerTestContext) {
        let first = create_client("single-active-first");
        let second = create_client("single-active-second");
        let (mut service, log) = service_for("alice-single-active");

        service.start(first, None, None).unwrap();
        assert_eq!(active_count("alice-single-active"), 1);

        let replacement = service.start(second, None, None).unwrap();
        assert_eq!(active_count("alice-single-active"), 1);
        assert_eq!(replacement.client_id, second);

        // The abandoned timer surfaced as a warning and left no entry behind.
        let messages = log.lock().unwrap();
        assert!(messages.iter().any(|m| m.contains("Abandoned previous timer")));
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_start_over_paused_timer_also_abandons(_ctx: &mut TimerTestContext) {
        let first = create_client("paused-abandon-first");
        let second = create_client("paused-abandon-second");
        let (mut service, _log) = service_for("alice-paused-abandon");

        service.start(first, None, None).unwrap();
        service.pause().unwrap();
        service.start(second, None, None).unwrap();

        assert_eq!(active_count("alice-paused-abandon"), 1);
        let active = service.active().unwrap().unwrap();
        assert_eq!(active.client_id, second);
        assert_eq!(active.status, TimerStatus::Running);
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_transitions_without_timer_are_precondition_errors(_ctx: &mut TimerTestContext) {
        let (mut service, _log) = service_for("alice-no-timer");

        let pause = service.pause().unwrap_err();
        assert!(matches!(pause, TimerError::NoActiveTimer));
        assert!(pause.is_precondition());

        let resume = service.resume().unwrap_err();
        assert!(matches!(resume, TimerError::NoActiveTimer));

        let stop = service.stop().unwrap_err();
        assert!(matches!(stop, TimerError::NoActiveTimer));
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_wrong_status_transitions_are_rejected(_ctx: &mut TimerTestContext) {
        let client_id = create_client("wrong-status-client");
        let (mut service, _log) = service_for("alice-wrong-status");

        service.start(client_id, None, None).unwrap();
        let resume = service.resume().unwrap_err();
        assert!(matches!(resume, TimerError::NotPaused));

        service.pause().unwrap();
        let pause = service.pause().unwrap_err();
        assert!(matches!(pause, TimerError::NotRunning));

        // The rejected transitions left the paused timer untouched.
        let active = service.active().unwrap().unwrap();
        assert_eq!(active.status, TimerStatus::Paused);
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_convert_creates_entry_and_deletes_timer(_ctx: &mut TimerTestContext) {
        let client_id = create_client("convert-client");
        let (mut service, log) = service_for("alice-convert");

        let started = service.start(client_id, None, Some("support call".to_string())).unwrap();
        Timers::new()
            .unwrap()
            .mark_running(started.id, Local::now().naive_local() - Duration::minutes(40))
            .unwrap();

        let stopped = service.stop().unwrap();
        let entry_id = service.convert_to_entry(&stopped, stopped.rounded_minutes).unwrap();

        let entry = TimeEntries::new().unwrap().fetch(entry_id).unwrap().unwrap();
        assert_eq!(entry.user, "alice-convert");
        assert_eq!(entry.client_id, client_id);
        assert_eq!(entry.description.as_deref(), Some("support call"));
        assert_eq!(entry.actual_minutes, 40);
        assert_eq!(entry.billed_minutes, 45);

        // The timer record does not outlive its conversion.
        assert!(Timers::new().unwrap().fetch(stopped.record.id).unwrap().is_none());
        assert!(log.lock().unwrap().iter().any(|m| m.contains("saved as time entry")));
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_convert_honors_chosen_actual_duration(_ctx: &mut TimerTestContext) {
        let client_id = create_client("convert-actual-client");
        let (mut service, _log) = service_for("alice-convert-actual");

        let started = service.start(client_id, None, None).unwrap();
        Timers::new()
            .unwrap()
            .mark_running(started.id, Local::now().naive_local() - Duration::minutes(40))
            .unwrap();

        let stopped = service.stop().unwrap();
        let entry_id = service.convert_to_entry(&stopped, stopped.actual_minutes).unwrap();

        let entry = TimeEntries::new().unwrap().fetch(entry_id).unwrap().unwrap();
        assert_eq!(entry.billed_minutes, 40);
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_discard_deletes_timer_without_entry(_ctx: &mut TimerTestContext) {
        let client_id = create_client("discard-client");
        let (mut service, _log) = service_for("alice-discard");

        service.start(client_id, None, None).unwrap();
        let stopped = service.stop().unwrap();
        service.discard(stopped.record.id).unwrap();

        assert!(Timers::new().unwrap().fetch(stopped.record.id).unwrap().is_none());
        assert_eq!(active_count("alice-discard"), 0);
    }

    #[test]
    fn test_elapsed_projection_running_and_paused() {
        let start = NaiveDateTime::parse_from_str("2025-06-16 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let running = TimerRecord {
            id: 1,
            user: "alice".to_string(),
            client_id: 1,
            product_id: None,
            description: None,
            status: TimerStatus::Running,
            start,
            end: None,
        };

        // Running timers project elapsed time from the start instant.
        let now = start + Duration::minutes(10);
        assert_eq!(TimerService::elapsed_of(&running, now).num_minutes(), 10);

        // Paused timers are fixed at end - start regardless of now.
        let paused = TimerRecord {
            status: TimerStatus::Paused,
            end: Some(start + Duration::minutes(30)),
            ..running
        };
        let much_later = start + Duration::hours(6);
        assert_eq!(TimerService::elapsed_of(&paused, much_later).num_minutes(), 30);
    }
}
