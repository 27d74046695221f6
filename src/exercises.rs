//! Exercise definitions - preset catalog and modality classification

use serde::{Deserialize, Serialize};

/// Training modality, decides which volume formula applies to a log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Strength,
    Cardio,
    #[serde(rename = "flex")]
    Flexibility,
}

impl Modality {
    pub fn emoji(&self) -> &'static str {
        match self {
            Modality::Strength => "💪",
            Modality::Cardio => "🏃",
            Modality::Flexibility => "🧘",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub modality: Modality,
}

/// Strength presets (sets x reps x weight)
pub const STRENGTH_EXERCISES: &[Exercise] = &[
    Exercise { id: "bench_press", name: "卧推", modality: Modality::Strength },
    Exercise { id: "squat", name: "深蹲", modality: Modality::Strength },
    Exercise { id: "deadlift", name: "硬拉", modality: Modality::Strength },
    Exercise { id: "pull_up", name: "引体向上", modality: Modality::Strength },
];

/// Cardio presets (distance or duration)
pub const CARDIO_EXERCISES: &[Exercise] = &[
    Exercise { id: "running", name: "跑步", modality: Modality::Cardio },
    Exercise { id: "cycling", name: "骑行", modality: Modality::Cardio },
    Exercise { id: "swimming", name: "游泳", modality: Modality::Cardio },
];

/// Flexibility presets (duration only)
pub const FLEX_EXERCISES: &[Exercise] = &[
    Exercise { id: "yoga", name: "瑜伽", modality: Modality::Flexibility },
    Exercise { id: "stretching", name: "拉伸", modality: Modality::Flexibility },
];

pub fn get_all_exercises() -> Vec<&'static Exercise> {
    STRENGTH_EXERCISES
        .iter()
        .chain(CARDIO_EXERCISES.iter())
        .chain(FLEX_EXERCISES.iter())
        .collect()
}

pub fn find_exercise(id: &str) -> Option<&'static Exercise> {
    get_all_exercises().into_iter().find(|e| e.id == id)
}

/// Find preset by its display name (what logs store)
pub fn find_exercise_by_name(name: &str) -> Option<&'static Exercise> {
    get_all_exercises().into_iter().find(|e| e.name == name)
}

/// Classify an exercise name. Presets are checked strength -> cardio -> flex,
/// anything unknown counts as strength.
pub fn classify(exercise: &str) -> Modality {
    find_exercise_by_name(exercise)
        .map(|e| e.modality)
        .unwrap_or(Modality::Strength)
}
