//! Per-session volume scoring

use serde::{Deserialize, Serialize};

use crate::db::WorkoutLog;
use crate::exercises::{Modality, classify};

/// Which weighting to score a session with.
///
/// The live progress view and the yearly recap weigh cardio and flexibility
/// differently, so both formulas exist side by side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VolumeFormula {
    /// Weekly summaries and level progress
    Standard,
    /// Yearly recap and ring visuals
    MoveRing,
}

impl VolumeFormula {
    /// Points per km of cardio distance
    fn per_km(self) -> f64 {
        match self {
            VolumeFormula::Standard => 60.0,
            VolumeFormula::MoveRing => 80.0,
        }
    }

    /// Points per cardio minute when no distance was logged
    fn per_cardio_minute(self) -> f64 {
        1.0
    }

    /// Points per flexibility minute
    fn per_flex_minute(self) -> f64 {
        match self {
            VolumeFormula::Standard => 10.0,
            VolumeFormula::MoveRing => 20.0,
        }
    }
}

/// Score one log. Missing numbers count as 0, except weight which counts as 1.
pub fn volume(log: &WorkoutLog, formula: VolumeFormula) -> f64 {
    match classify(&log.exercise) {
        Modality::Strength => {
            let sets = log.sets.unwrap_or(0.0);
            let reps = log.reps.unwrap_or(0.0);
            let weight = log.weight.unwrap_or(1.0);
            sets * reps * weight
        }
        Modality::Cardio => {
            let distance = log.distance.unwrap_or(0.0);
            if distance > 0.0 {
                distance * formula.per_km()
            } else {
                log.duration.unwrap_or(0.0) * formula.per_cardio_minute()
            }
        }
        Modality::Flexibility => log.duration.unwrap_or(0.0) * formula.per_flex_minute(),
    }
}

impl WorkoutLog {
    pub fn volume(&self, formula: VolumeFormula) -> f64 {
        volume(self, formula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::exercises::get_all_exercises;

    fn create_log(exercise: &str) -> WorkoutLog {
        WorkoutLog::new("t", Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(), exercise)
    }

    #[test]
    fn test_strength_volume_same_for_both_formulas() {
        let mut log = create_log("卧推");
        log.sets = Some(3.0);
        log.reps = Some(10.0);
        log.weight = Some(50.0);
        assert_eq!(volume(&log, VolumeFormula::Standard), 1500.0);
        assert_eq!(volume(&log, VolumeFormula::MoveRing), 1500.0);
    }

    #[test]
    fn test_missing_weight_defaults_to_one() {
        let mut log = create_log("深蹲");
        log.sets = Some(3.0);
        log.reps = Some(10.0);
        assert_eq!(log.volume(VolumeFormula::Standard), 30.0);
    }

    #[test]
    fn test_strength_without_sets_is_zero() {
        let mut log = create_log("硬拉");
        log.weight = Some(100.0);
        assert_eq!(log.volume(VolumeFormula::Standard), 0.0);
    }

    #[test]
    fn test_cardio_prefers_distance() {
        let mut log = create_log("跑步");
        log.distance = Some(5.0);
        log.duration = Some(30.0);
        assert_eq!(log.volume(VolumeFormula::Standard), 300.0);
        assert_eq!(log.volume(VolumeFormula::MoveRing), 400.0);
    }

    #[test]
    fn test_cardio_falls_back_to_duration() {
        let mut log = create_log("游泳");
        log.duration = Some(45.0);
        assert_eq!(log.volume(VolumeFormula::Standard), 45.0);
        assert_eq!(log.volume(VolumeFormula::MoveRing), 45.0);

        log.distance = Some(0.0);
        assert_eq!(log.volume(VolumeFormula::MoveRing), 45.0);
    }

    #[test]
    fn test_flexibility_volume() {
        let mut log = create_log("瑜伽");
        log.duration = Some(15.0);
        assert_eq!(log.volume(VolumeFormula::Standard), 150.0);
        assert_eq!(log.volume(VolumeFormula::MoveRing), 300.0);
    }

    #[test]
    fn test_unknown_exercise_scored_as_strength() {
        let mut log = create_log("kettlebell swing");
        log.sets = Some(2.0);
        log.reps = Some(20.0);
        log.duration = Some(10.0);
        assert_eq!(log.volume(VolumeFormula::MoveRing), 40.0);
    }

    #[test]
    fn test_empty_log_is_zero() {
        for name in ["卧推", "骑行", "拉伸"] {
            let log = create_log(name);
            assert_eq!(log.volume(VolumeFormula::Standard), 0.0);
            assert_eq!(log.volume(VolumeFormula::MoveRing), 0.0);
        }
    }

    #[test]
    fn test_volume_non_negative_for_non_negative_inputs() {
        let mut names: Vec<&str> = get_all_exercises().iter().map(|e| e.name).collect();
        names.push("trail running");

        for name in names {
            for distance in [0.0, 5.0] {
                let mut log = create_log(name);
                log.sets = Some(3.0);
                log.reps = Some(12.0);
                log.weight = Some(0.0);
                log.distance = Some(distance);
                log.duration = Some(45.0);
                for formula in [VolumeFormula::Standard, VolumeFormula::MoveRing] {
                    let v = log.volume(formula);
                    assert!(v >= 0.0, "{} {:?} -> {}", name, formula, v);
                }
            }
        }
    }
}
