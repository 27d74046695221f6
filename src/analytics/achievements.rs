//! Achievement wall for the recap view

use serde::Serialize;

use super::recap::YearlyRecap;
use crate::db::WorkoutLog;
use crate::exercises::{Modality, classify};

/// Logs of one modality (whole history) for the modality achievements
const MODALITY_TARGET: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Achievement {
    #[serde(rename = "first")]
    FirstWorkout,
    #[serde(rename = "streak7")]
    WeekStreak,
    #[serde(rename = "strength")]
    StrengthMaster,
    #[serde(rename = "cardio")]
    CardioRunner,
    #[serde(rename = "level5")]
    LevelFive,
}

impl Achievement {
    /// Display order of the wall
    pub fn all() -> &'static [Achievement] {
        &[
            Achievement::FirstWorkout,
            Achievement::WeekStreak,
            Achievement::StrengthMaster,
            Achievement::CardioRunner,
            Achievement::LevelFive,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Achievement::FirstWorkout => "First Workout",
            Achievement::WeekStreak => "7-Day Streak",
            Achievement::StrengthMaster => "Strength Master",
            Achievement::CardioRunner => "Cardio Runner",
            Achievement::LevelFive => "Level Up Lv5",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Achievement::FirstWorkout => "🏅",
            Achievement::WeekStreak => "🔥",
            Achievement::StrengthMaster => "💪",
            Achievement::CardioRunner => "🏃",
            Achievement::LevelFive => "⭐",
        }
    }
}

/// Achievements unlocked by a recap. Modality counts use the full history,
/// everything else the recap year.
pub fn unlocked_achievements(recap: &YearlyRecap, logs: &[WorkoutLog]) -> Vec<Achievement> {
    let count_of = |modality: Modality| {
        logs.iter()
            .filter(|log| classify(&log.exercise) == modality)
            .count()
    };

    Achievement::all()
        .iter()
        .copied()
        .filter(|achievement| match achievement {
            Achievement::FirstWorkout => recap.total_workouts > 0,
            Achievement::WeekStreak => recap.longest_streak >= 7,
            Achievement::StrengthMaster => count_of(Modality::Strength) >= MODALITY_TARGET,
            Achievement::CardioRunner => count_of(Modality::Cardio) >= MODALITY_TARGET,
            Achievement::LevelFive => recap.total_workouts >= 100,
        })
        .collect()
}
