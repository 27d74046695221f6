//! Yearly recap - the year-scoped aggregate behind the recap view and exports

use std::collections::HashSet;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::streak::analyze_activity;
use super::volume::VolumeFormula;
use super::{chronological, most_frequent, whole_days_between};
use crate::db::WorkoutLog;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStat {
    /// 0 = January
    pub month: u32,
    pub count: usize,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    /// Whole weeks since local midnight of Jan 1
    pub week_index: i64,
    /// 0 = Sunday
    pub day_of_week: u32,
    pub has_workout: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub date: DateTime<Utc>,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyRecap {
    pub year: i32,
    pub total_workouts: usize,
    /// Move Ring volume
    pub total_volume: f64,
    pub total_distance: f64,
    pub total_minutes: f64,
    pub active_days: usize,
    pub best_exercise: Option<String>,
    pub longest_streak: usize,
    pub monthly_workouts: Vec<MonthlyStat>,
    pub weekly_heatmap: Vec<HeatmapCell>,
    pub volume_timeline: Vec<VolumePoint>,
}

impl YearlyRecap {
    /// Recap of a year without a single workout
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            total_workouts: 0,
            total_volume: 0.0,
            total_distance: 0.0,
            total_minutes: 0.0,
            active_days: 0,
            best_exercise: None,
            longest_streak: 0,
            monthly_workouts: Vec::new(),
            weekly_heatmap: Vec::new(),
            volume_timeline: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_workouts == 0
    }
}

/// Local midnight of Jan 1, falling back to UTC midnight if that wall time
/// does not exist in `tz`.
fn year_start<Tz: TimeZone>(year: i32, tz: &Tz) -> Option<DateTime<Utc>> {
    let midnight = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let start = tz
        .from_local_datetime(&midnight)
        .earliest()
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc());
    Some(start)
}

fn move_ring(log: &WorkoutLog) -> f64 {
    log.volume(VolumeFormula::MoveRing)
}

/// Build the recap for calendar `year` as seen in `tz`.
///
/// Heatmap weekdays are Sunday-first, unlike the Monday-first slots of
/// weekly summaries; both layouts are consumed as-is by their views.
pub fn build_yearly_recap<Tz: TimeZone>(logs: &[WorkoutLog], year: i32, tz: &Tz) -> YearlyRecap {
    let year_logs: Vec<&WorkoutLog> = logs
        .iter()
        .filter(|log| log.date.with_timezone(tz).year() == year)
        .collect();

    if year_logs.is_empty() {
        return YearlyRecap::empty(year);
    }
    let Some(start) = year_start(year, tz) else {
        return YearlyRecap::empty(year);
    };

    let total_volume: f64 = year_logs.iter().map(|log| move_ring(log)).sum();
    let total_distance: f64 = year_logs.iter().map(|log| log.distance.unwrap_or(0.0)).sum();
    let total_minutes: f64 = year_logs.iter().map(|log| log.duration.unwrap_or(0.0)).sum();

    let activity = analyze_activity(year_logs.iter().copied(), tz);
    let best_exercise = most_frequent(year_logs.iter().map(|log| log.exercise.as_str()));

    let mut monthly_workouts: Vec<MonthlyStat> = (0..12)
        .map(|month| MonthlyStat { month, count: 0, volume: 0.0 })
        .collect();
    for log in &year_logs {
        let month = log.date.with_timezone(tz).month0() as usize;
        monthly_workouts[month].count += 1;
        monthly_workouts[month].volume += move_ring(log);
    }

    let mut seen = HashSet::new();
    let mut weekly_heatmap = Vec::new();
    for log in &year_logs {
        let week_index = whole_days_between(start, log.date).div_euclid(7);
        let day_of_week = log.date.with_timezone(tz).weekday().num_days_from_sunday();
        if seen.insert((week_index, day_of_week)) {
            weekly_heatmap.push(HeatmapCell { week_index, day_of_week, has_workout: true });
        }
    }

    let volume_timeline = chronological(year_logs.iter().copied())
        .into_iter()
        .map(|log| VolumePoint { date: log.date, volume: move_ring(log) })
        .collect();

    YearlyRecap {
        year,
        total_workouts: year_logs.len(),
        total_volume,
        total_distance,
        total_minutes,
        active_days: activity.active_days,
        best_exercise,
        longest_streak: activity.longest_streak,
        monthly_workouts,
        weekly_heatmap,
        volume_timeline,
    }
}
