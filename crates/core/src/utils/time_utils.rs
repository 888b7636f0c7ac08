use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use chrono_tz::Tz;

/// Timezone used to derive "today" when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::UTC;

/// Converts a UTC instant to a calendar date in the given timezone.
///
/// This is the single place where wall-clock instants become domain dates.
/// Metrics never read the clock themselves; callers derive `today` here and
/// pass it in.
pub fn date_in_timezone(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's date in the given timezone.
pub fn today_in(tz: Tz) -> NaiveDate {
    date_in_timezone(Utc::now(), tz)
}

/// Number of calendar months from `today` until `target_date`, counting a
/// partial month as a whole one. Never less than 1, so it is always safe to
/// divide by.
///
/// Month arithmetic clamps to the end of shorter months, e.g. Jan 31 plus one
/// month is Feb 28 (or 29).
pub fn months_remaining(today: NaiveDate, target_date: NaiveDate) -> u32 {
    if target_date <= today {
        return 1;
    }

    let calendar_diff = (target_date.year() - today.year()) * 12 + target_date.month() as i32
        - today.month() as i32;
    let calendar_diff = calendar_diff.max(0) as u32;

    let months = match today.checked_add_months(Months::new(calendar_diff)) {
        // A remainder is left after the last whole month.
        Some(anchor) if anchor < target_date => calendar_diff + 1,
        _ => calendar_diff,
    };

    months.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exact_month_boundaries() {
        assert_eq!(months_remaining(date(2025, 1, 15), date(2025, 11, 15)), 10);
        assert_eq!(months_remaining(date(2025, 1, 15), date(2026, 1, 15)), 12);
    }

    #[test]
    fn test_partial_month_rounds_up() {
        assert_eq!(months_remaining(date(2025, 1, 15), date(2025, 3, 10)), 2);
        assert_eq!(months_remaining(date(2025, 1, 15), date(2025, 3, 20)), 3);
        assert_eq!(months_remaining(date(2025, 1, 15), date(2025, 1, 16)), 1);
    }

    #[test]
    fn test_end_of_month_clamping() {
        assert_eq!(months_remaining(date(2025, 1, 31), date(2025, 2, 28)), 1);
        assert_eq!(months_remaining(date(2025, 1, 31), date(2025, 3, 1)), 2);
    }

    #[test]
    fn test_due_today_or_past_is_one_month() {
        assert_eq!(months_remaining(date(2025, 6, 1), date(2025, 6, 1)), 1);
        assert_eq!(months_remaining(date(2025, 6, 1), date(2024, 1, 1)), 1);
    }

    #[test]
    fn test_date_in_timezone_crosses_midnight() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 1, 2, 0, 0).unwrap();
        assert_eq!(date_in_timezone(instant, chrono_tz::UTC), date(2025, 3, 1));
        assert_eq!(
            date_in_timezone(instant, chrono_tz::America::New_York),
            date(2025, 2, 28)
        );
    }
}
