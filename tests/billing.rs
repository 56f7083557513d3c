#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use tidvis::libs::billing::{
        billable_minutes, is_valid_time_of_day, parse_time_of_day, round_to_increment, TimeSpan,
    };

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
    }

    #[test]
    fn test_same_day_span_actual_minutes() {
        let span = TimeSpan::compute("09:00", "10:30", date());
        assert_eq!(span.actual_minutes(), 90);
        assert_eq!(span.start.date(), date());
        assert_eq!(span.end.date(), date());
    }

    #[test]
    fn test_equal_times_give_zero_minutes() {
        let span = TimeSpan::compute("09:00", "09:00", date());
        assert_eq!(span.actual_minutes(), 0);
    }

    #[test]
    fn test_end_before_start_rolls_over_one_day() {
        let span = TimeSpan::compute("23:30", "00:15", date());
        assert_eq!(span.actual_minutes(), 45);
        assert_eq!(span.end.date(), date() + Duration::days(1));
        assert!(span.end >= span.start);
    }

    #[test]
    fn test_rollover_applies_exactly_once() {
        // One minute before midnight to one minute after start: nearly a full day
        let span = TimeSpan::compute("12:00", "11:59", date());
        assert_eq!(span.actual_minutes(), 24 * 60 - 1);
    }

    #[test]
    fn test_rounding_boundary_table() {
        let table = [
            (0, 0),
            (1, 15),
            (15, 15),
            (16, 30),
            (30, 30),
            (31, 45),
            (45, 45),
            (46, 60),
            (59, 60),
            (60, 60),
            (61, 75),
        ];
        for (actual, expected) in table {
            assert_eq!(round_to_increment(actual), expected, "rounding {} minutes", actual);
        }
    }

    #[test]
    fn test_rounding_is_idempotent_on_block_boundaries() {
        for minutes in (0i64..=480).step_by(15) {
            assert_eq!(round_to_increment(minutes), minutes);
            assert_eq!(round_to_increment(round_to_increment(minutes + 7)), round_to_increment(minutes + 7));
        }
    }

    #[test]
    fn test_rounding_never_rounds_down() {
        for minutes in 0i64..=600 {
            let rounded = round_to_increment(minutes);
            assert!(rounded >= minutes);
            assert!(rounded - minutes < 15);
        }
    }

    #[test]
    fn test_negative_minutes_round_to_zero() {
        assert_eq!(round_to_increment(-5), 0);
    }

    #[test]
    fn test_billable_minutes_suppression_flag() {
        assert_eq!(billable_minutes(52, true), 60);
        assert_eq!(billable_minutes(52, false), 52);
        // Suppressed negative values still clamp to zero
        assert_eq!(billable_minutes(-3, false), 0);
    }

    #[test]
    fn test_minimum_duration_helper_extends_short_spans() {
        let span = TimeSpan::compute("09:00", "09:07", date()).with_minimum();
        assert_eq!(span.actual_minutes(), 15);
        assert_eq!(span.end, span.start + Duration::minutes(15));
    }

    #[test]
    fn test_minimum_duration_helper_leaves_long_spans_alone() {
        let span = TimeSpan::compute("09:00", "10:00", date());
        assert_eq!(span.with_minimum(), span);
    }

    #[test]
    fn test_minimum_duration_helper_is_opt_in() {
        // compute alone never applies the minimum
        let span = TimeSpan::compute("09:00", "09:05", date());
        assert_eq!(span.actual_minutes(), 5);
    }

    #[test]
    fn test_sanity_threshold_flags_long_spans() {
        // 23:00 the previous evening reading as a rollover span of 17 hours
        let long = TimeSpan::compute("23:00", "16:00", date());
        assert!(long.exceeds_sanity_threshold());

        let normal = TimeSpan::compute("08:00", "17:00", date());
        assert!(!normal.exceeds_sanity_threshold());

        // Exactly 16 hours is still accepted without a flag
        let boundary = TimeSpan::compute("06:00", "22:00", date());
        assert!(!boundary.exceeds_sanity_threshold());
    }

    #[test]
    fn test_parse_time_of_day_happy_path() {
        let time = parse_time_of_day("14:45");
        assert_eq!(time.to_string(), "14:45:00");
    }

    #[test]
    fn test_parse_time_of_day_degrades_malformed_components_to_zero() {
        // Wrong number of parts
        assert_eq!(parse_time_of_day("14").to_string(), "14:00:00");
        // Non-numeric components
        assert_eq!(parse_time_of_day("ab:cd").to_string(), "00:00:00");
        // Out-of-range hour degrades, valid minute survives
        assert_eq!(parse_time_of_day("24:10").to_string(), "00:10:00");
        // Out-of-range minute degrades, valid hour survives
        assert_eq!(parse_time_of_day("10:61").to_string(), "10:00:00");
        // Completely empty input
        assert_eq!(parse_time_of_day("").to_string(), "00:00:00");
    }

    #[test]
    fn test_is_valid_time_of_day() {
        assert!(is_valid_time_of_day("00:00"));
        assert!(is_valid_time_of_day("23:59"));
        assert!(is_valid_time_of_day("9:05"));
        assert!(!is_valid_time_of_day("24:00"));
        assert!(!is_valid_time_of_day("12:60"));
        assert!(!is_valid_time_of_day("12"));
        assert!(!is_valid_time_of_day("12:00:00"));
        assert!(!is_valid_time_of_day("ab:cd"));
        assert!(!is_valid_time_of_day(""));
    }
}
