//! Rolling weekly summaries anchored to the first ever log

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::volume::VolumeFormula;
use super::{chronological, most_frequent, whole_days_between};
use crate::db::WorkoutLog;

/// Aggregate for one 7-day window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    /// 0 = the week starting on the first log's date
    pub week_index: u32,
    /// `MM/DD`
    pub start_date: String,
    /// `MM/DD`
    pub end_date: String,
    pub total_sessions: u32,
    pub most_frequent_exercise: Option<String>,
    pub total_volume: f64,
    /// Standard volume per weekday, Monday first
    pub daily_volumes: [f64; 7],
}

impl WeeklySummary {
    fn new(week_index: u32, first_day: NaiveDate) -> Self {
        let start = first_day
            .checked_add_days(Days::new(u64::from(week_index) * 7))
            .unwrap_or(NaiveDate::MAX);
        let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
        Self {
            week_index,
            start_date: start.format("%m/%d").to_string(),
            end_date: end.format("%m/%d").to_string(),
            total_sessions: 0,
            most_frequent_exercise: None,
            total_volume: 0.0,
            daily_volumes: [0.0; 7],
        }
    }
}

/// Bucket logs into consecutive 7-day windows starting at the earliest log.
///
/// Window membership is by elapsed whole days since that first instant;
/// `daily_volumes` slots use the calendar weekday in `tz`, Monday = 0.
pub fn build_weekly_summaries<Tz: TimeZone>(logs: &[WorkoutLog], tz: &Tz) -> Vec<WeeklySummary> {
    let sorted = chronological(logs);
    let Some(first) = sorted.first().map(|log| log.date) else {
        return Vec::new();
    };
    let first_day = first.with_timezone(tz).date_naive();
    let week_of = |log: &WorkoutLog| -> u32 { (whole_days_between(first, log.date) / 7) as u32 };

    let mut weeks: BTreeMap<u32, WeeklySummary> = BTreeMap::new();
    for &log in &sorted {
        let week_index = week_of(log);
        let day_of_week = log.date.with_timezone(tz).weekday().num_days_from_monday() as usize;
        let volume = log.volume(VolumeFormula::Standard);

        let summary = weeks
            .entry(week_index)
            .or_insert_with(|| WeeklySummary::new(week_index, first_day));
        summary.total_sessions += 1;
        summary.total_volume += volume;
        summary.daily_volumes[day_of_week] += volume;
    }

    // Tally in input order so ties go to the name seen first
    for (week_index, summary) in weeks.iter_mut() {
        summary.most_frequent_exercise = most_frequent(
            logs.iter()
                .filter(|log| week_of(*log) == *week_index)
                .map(|log| log.exercise.as_str()),
        );
    }

    weeks.into_values().collect()
}
