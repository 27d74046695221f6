//! Active days and longest consecutive-day streak

use std::collections::BTreeSet;

use chrono::{NaiveDate, TimeZone};

use crate::db::WorkoutLog;

/// Day-level activity over a set of logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivityStats {
    pub active_days: usize,
    pub longest_streak: usize,
}

/// Distinct calendar days (in `tz`) with at least one log, ascending
pub fn active_days<'a, Tz, I>(logs: I, tz: &Tz) -> BTreeSet<NaiveDate>
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'a WorkoutLog>,
{
    logs.into_iter()
        .map(|log| log.date.with_timezone(tz).date_naive())
        .collect()
}

/// Longest run of consecutive days in an ascending day set
pub fn longest_streak(days: &BTreeSet<NaiveDate>) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut prev: Option<NaiveDate> = None;

    for &day in days {
        current = match prev {
            Some(p) if (day - p).num_days() == 1 => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        prev = Some(day);
    }

    longest
}

pub fn analyze_activity<'a, Tz, I>(logs: I, tz: &Tz) -> ActivityStats
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'a WorkoutLog>,
{
    let days = active_days(logs, tz);
    ActivityStats {
        active_days: days.len(),
        longest_streak: longest_streak(&days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};

    fn log_on(month: u32, day: u32, hour: u32) -> WorkoutLog {
        WorkoutLog::new(
            format!("{}-{}-{}", month, day, hour),
            Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).unwrap(),
            "深蹲",
        )
    }

    #[test]
    fn test_empty() {
        let logs: Vec<WorkoutLog> = Vec::new();
        assert_eq!(analyze_activity(&logs, &Utc), ActivityStats::default());
    }

    #[test]
    fn test_single_log_is_streak_of_one() {
        let stats = analyze_activity(&[log_on(1, 10, 9)], &Utc);
        assert_eq!(stats, ActivityStats { active_days: 1, longest_streak: 1 });
    }

    #[test]
    fn test_consecutive_days() {
        let start = Utc.with_ymd_and_hms(2024, 2, 27, 7, 0, 0).unwrap();
        let logs: Vec<_> = (0..5)
            .map(|i| WorkoutLog::new(i.to_string(), start + Duration::days(i), "跑步"))
            .collect();
        // crosses Feb 29 in a leap year
        let stats = analyze_activity(&logs, &Utc);
        assert_eq!(stats.longest_streak, 5);
        assert_eq!(stats.active_days, 5);
    }

    #[test]
    fn test_gap_takes_longer_run() {
        let logs = vec![
            log_on(3, 1, 8),
            log_on(3, 2, 8),
            // gap on the 3rd
            log_on(3, 4, 8),
            log_on(3, 5, 8),
            log_on(3, 6, 8),
        ];
        assert_eq!(analyze_activity(&logs, &Utc).longest_streak, 3);
    }

    #[test]
    fn test_same_day_logs_count_once() {
        let logs = vec![log_on(5, 1, 6), log_on(5, 1, 20), log_on(5, 2, 7)];
        let stats = analyze_activity(&logs, &Utc);
        assert_eq!(stats.active_days, 2);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn test_unordered_input() {
        let logs = vec![log_on(6, 3, 8), log_on(6, 1, 8), log_on(6, 2, 8)];
        assert_eq!(analyze_activity(&logs, &Utc).longest_streak, 3);
    }

    #[test]
    fn test_days_follow_timezone() {
        // 22:00 and 23:00 UTC are the next day in UTC+8
        let logs = vec![log_on(7, 1, 22), log_on(7, 1, 23)];
        let beijing = FixedOffset::east_opt(8 * 3600).unwrap();
        let days = active_days(&logs, &beijing);
        assert_eq!(days.len(), 1);
        assert_eq!(days.first(), NaiveDate::from_ymd_opt(2024, 7, 2).as_ref());
    }
}
