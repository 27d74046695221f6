//! Level progression and badges
//!
//! The level is a pure function of time elapsed since the first log: every
//! 7 days the user moves up one level, regardless of how much they trained.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::weekly::WeeklySummary;
use super::whole_days_between;
use crate::db::WorkoutLog;

/// Days per level cycle
pub const DAYS_IN_CYCLE: u32 = 7;

/// What a badge requires, counted over the whole history
#[derive(Debug, Clone, Copy)]
pub enum BadgeRule {
    /// At least `n` logs of one exercise
    Exercise(&'static str, usize),
    /// At least `n` logs overall
    TotalLogs(usize),
}

#[derive(Debug, Clone)]
pub struct Badge {
    pub label: &'static str,
    pub rule: BadgeRule,
}

pub const BADGES: &[Badge] = &[
    Badge { label: "深蹲达人", rule: BadgeRule::Exercise("深蹲", 10) },
    Badge { label: "跑步王者", rule: BadgeRule::Exercise("跑步", 10) },
    Badge { label: "硬拉勇士", rule: BadgeRule::Exercise("硬拉", 8) },
    Badge { label: "坚持之王", rule: BadgeRule::TotalLogs(30) },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    pub level: u32,
    /// 1..=7, or 0 when there are no logs yet
    pub current_day: u32,
    pub days_in_cycle: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_week_summary: Option<WeeklySummary>,
    pub summaries: Vec<WeeklySummary>,
    pub badges: Vec<String>,
}

/// Badges earned by a log history, in `BADGES` order
pub fn unlocked_badges(logs: &[WorkoutLog]) -> Vec<String> {
    let mut by_exercise: HashMap<&str, usize> = HashMap::new();
    for log in logs {
        *by_exercise.entry(log.exercise.as_str()).or_default() += 1;
    }

    BADGES
        .iter()
        .filter(|badge| match badge.rule {
            BadgeRule::Exercise(name, min) => by_exercise.get(name).copied().unwrap_or(0) >= min,
            BadgeRule::TotalLogs(min) => logs.len() >= min,
        })
        .map(|badge| badge.label.to_string())
        .collect()
}

/// Compute level info as of `now`.
///
/// A first log later than `now` counts as zero elapsed days.
pub fn compute_level(
    logs: &[WorkoutLog],
    summaries: &[WeeklySummary],
    now: DateTime<Utc>,
) -> LevelInfo {
    let Some(first) = logs.iter().map(|log| log.date).min() else {
        return LevelInfo {
            level: 1,
            current_day: 0,
            days_in_cycle: DAYS_IN_CYCLE,
            current_week_summary: None,
            summaries: summaries.to_vec(),
            badges: Vec::new(),
        };
    };

    let days_since_first = whole_days_between(first, now).max(0);
    let cycle = i64::from(DAYS_IN_CYCLE);
    let level = u32::try_from(days_since_first / cycle + 1).unwrap_or(u32::MAX);
    let current_day = (days_since_first % cycle) as u32 + 1;

    let current_week_summary = summaries
        .iter()
        .find(|s| s.week_index == level - 1)
        .or_else(|| summaries.last())
        .cloned();

    LevelInfo {
        level,
        current_day,
        days_in_cycle: DAYS_IN_CYCLE,
        current_week_summary,
        summaries: summaries.to_vec(),
        badges: unlocked_badges(logs),
    }
}
