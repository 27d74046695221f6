//! Analytics module - workout aggregation
//!
//! Features:
//! - Standard and Move Ring volume scoring
//! - Active days and streaks
//! - Rolling weekly summaries and time-based levels
//! - Yearly recap with achievements and rings
//!
//! Everything here is a pure function of the logs passed in. Calendar
//! values are computed in an explicit timezone and "now" is always an input.

pub mod achievements;
pub mod level;
pub mod recap;
pub mod rings;
pub mod streak;
pub mod volume;
pub mod weekly;

pub use achievements::{Achievement, unlocked_achievements};
pub use level::{LevelInfo, compute_level};
pub use recap::{YearlyRecap, build_yearly_recap};
pub use rings::{Ring, RingKind, yearly_rings};
pub use streak::{ActivityStats, analyze_activity};
pub use volume::{VolumeFormula, volume};
pub use weekly::{WeeklySummary, build_weekly_summaries};

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::db::WorkoutLog;

const MS_PER_DAY: i64 = 86_400_000;

/// Whole elapsed days from `from` to `to`, rounded toward negative infinity
pub(crate) fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_milliseconds().div_euclid(MS_PER_DAY)
}

/// Stable sort by date
pub(crate) fn chronological<'a, I>(logs: I) -> Vec<&'a WorkoutLog>
where
    I: IntoIterator<Item = &'a WorkoutLog>,
{
    let mut sorted: Vec<_> = logs.into_iter().collect();
    sorted.sort_by_key(|log| log.date);
    sorted
}

/// Most common name; on a tie the one encountered first wins
pub(crate) fn most_frequent<'a, I>(names: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    // Vec keeps first-seen order
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for name in names {
        match counts.iter_mut().find(|(n, _)| *n == name) {
            Some((_, count)) => *count += 1,
            None => counts.push((name, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (name, count) in counts {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name.to_string())
}

/// Snapshot of a user's logs evaluated in one timezone
pub struct Analytics<Tz: TimeZone = Local> {
    logs: Vec<WorkoutLog>,
    tz: Tz,
}

impl Analytics<Local> {
    pub fn new(logs: Vec<WorkoutLog>) -> Self {
        Self { logs, tz: Local }
    }
}

impl<Tz: TimeZone> Analytics<Tz> {
    pub fn with_timezone(logs: Vec<WorkoutLog>, tz: Tz) -> Self {
        Self { logs, tz }
    }

    pub fn weekly_summaries(&self) -> Vec<WeeklySummary> {
        build_weekly_summaries(&self.logs, &self.tz)
    }

    /// Weekly summaries plus level as of `now`
    pub fn level(&self, now: DateTime<Utc>) -> LevelInfo {
        compute_level(&self.logs, &self.weekly_summaries(), now)
    }

    pub fn activity(&self) -> ActivityStats {
        analyze_activity(&self.logs, &self.tz)
    }

    pub fn yearly_recap(&self, year: i32) -> YearlyRecap {
        build_yearly_recap(&self.logs, year, &self.tz)
    }

    pub fn achievements(&self, recap: &YearlyRecap) -> Vec<Achievement> {
        unlocked_achievements(recap, &self.logs)
    }

    /// Years that have at least one log, ascending
    pub fn years(&self) -> Vec<i32> {
        use chrono::Datelike;

        let mut years: Vec<i32> = self
            .logs
            .iter()
            .map(|log| log.date.with_timezone(&self.tz).year())
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}
