#[cfg(test)]
mod tests {
    use chrono::Duration;
    use tidvis::libs::formatter::{format_duration, format_elapsed, format_minutes};

    #[test]
    fn test_format_duration_zero() {
        assert_eq!(format_duration(&Duration::zero()), "00:00");
    }

    #[test]
    fn test_format_duration_minutes_only() {
        assert_eq!(format_duration(&Duration::minutes(30)), "00:30");
        assert_eq!(format_duration(&Duration::minutes(59)), "00:59");
        assert_eq!(format_duration(&Duration::minutes(1)), "00:01");
    }

    #[test]
    fn test_format_duration_hours_and_minutes() {
        assert_eq!(format_duration(&(Duration::hours(1) + Duration::minutes(30))), "01:30");
        assert_eq!(format_duration(&(Duration::hours(8) + Duration::minutes(45))), "08:45");
        assert_eq!(format_duration(&Duration::minutes(150)), "02:30");
    }

    #[test]
    fn test_format_duration_large_hours() {
        assert_eq!(format_duration(&Duration::hours(24)), "24:00");
        assert_eq!(format_duration(&Duration::hours(100)), "100:00");
    }

    #[test]
    fn test_format_duration_negative_clamped_to_zero() {
        assert_eq!(format_duration(&Duration::minutes(-30)), "00:00");
        assert_eq!(format_duration(&Duration::hours(-5)), "00:00");
    }

    #[test]
    fn test_format_duration_seconds_truncated() {
        assert_eq!(format_duration(&(Duration::minutes(30) + Duration::seconds(59))), "00:30");
        assert_eq!(format_duration(&(Duration::minutes(30) + Duration::seconds(60))), "00:31");
    }

    #[test]
    fn test_format_elapsed_includes_seconds() {
        assert_eq!(format_elapsed(&Duration::seconds(5)), "00:00:05");
        assert_eq!(format_elapsed(&(Duration::minutes(61) + Duration::seconds(2))), "01:01:02");
        assert_eq!(format_elapsed(&Duration::seconds(-10)), "00:00:00");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "00:00");
        assert_eq!(format_minutes(45), "00:45");
        assert_eq!(format_minutes(90), "01:30");
        assert_eq!(format_minutes(60 * 8 + 15), "08:15");
    }
}
