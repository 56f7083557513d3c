#[cfg(test)]
mod tests {
    use chrono::{Duration as ChronoDuration, Local, NaiveDateTime};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tidvis::libs::ticker::{elapsed_since, Ticker, VisibilityGate};
    use tokio::time::{timeout, Duration};

    fn instant(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_elapsed_since_projects_wall_clock_difference() {
        let start = instant("2025-06-16 09:00:00");
        let now = instant("2025-06-16 09:25:30");
        let elapsed = elapsed_since(start, now);
        assert_eq!(elapsed.num_minutes(), 25);
        assert_eq!(elapsed.num_seconds(), 25 * 60 + 30);
    }

    #[test]
    fn test_elapsed_since_clamps_negative_to_zero() {
        let start = instant("2025-06-16 09:00:00");
        let earlier = start - ChronoDuration::minutes(5);
        assert_eq!(elapsed_since(start, earlier), ChronoDuration::zero());
    }

    #[test]
    fn test_visibility_gate_is_shared_across_clones() {
        let gate = VisibilityGate::new(true);
        let handle = gate.clone();
        assert!(gate.is_visible());

        handle.set_visible(false);
        assert!(!gate.is_visible());

        handle.set_visible(true);
        assert!(gate.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_ticks_while_visible() {
        let ticker = Ticker::new(Local::now().naive_local(), VisibilityGate::new(true));

        let mut count = 0;
        ticker
            .run(|_| {
                count += 1;
                count < 5
            })
            .await;
        assert_eq!(count, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_is_suspended_while_hidden() {
        let ticker = Ticker::new(Local::now().naive_local(), VisibilityGate::new(false));

        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let result = timeout(
            Duration::from_secs(3),
            ticker.run(move |_| {
                counter.fetch_add(1, Ordering::Relaxed);
                true
            }),
        )
        .await;

        // The loop never finished and, while hidden, never ticked.
        assert!(result.is_err());
        assert_eq!(ticks.load(Ordering::Relaxed), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_recomputes_after_becoming_visible() {
        let gate = VisibilityGate::new(false);
        let ticker = Ticker::new(Local::now().naive_local(), gate.clone());

        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        tokio::select! {
            _ = ticker.run(move |_| {
                let seen = counter.fetch_add(1, Ordering::Relaxed) + 1;
                seen < 3
            }) => {}
            _ = async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                gate.set_visible(true);
                std::future::pending::<()>().await
            } => {}
        }

        assert_eq!(ticks.load(Ordering::Relaxed), 3);
    }
}
