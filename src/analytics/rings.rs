//! Yearly Move / Exercise / Stand rings

use serde::Serialize;

use super::recap::YearlyRecap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RingKind {
    /// Move Ring volume
    Move,
    /// Minutes trained
    Exercise,
    /// Active days
    Stand,
}

impl RingKind {
    /// Goal floor; goals otherwise sit at 75% of the achieved value
    fn min_goal(self) -> f64 {
        match self {
            RingKind::Move => 500.0,
            RingKind::Exercise => 2000.0,
            RingKind::Stand => 150.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RingKind::Move => "Move",
            RingKind::Exercise => "Exercise",
            RingKind::Stand => "Stand",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ring {
    pub kind: RingKind,
    pub value: f64,
    pub goal: f64,
    /// 0.0..=1.0
    pub progress: f64,
}

impl Ring {
    fn new(kind: RingKind, value: f64) -> Self {
        let goal = kind.min_goal().max((value * 0.75).round());
        Self {
            kind,
            value,
            goal,
            progress: (value / goal).min(1.0),
        }
    }
}

/// The three rings, outermost first
pub fn yearly_rings(recap: &YearlyRecap) -> [Ring; 3] {
    [
        Ring::new(RingKind::Move, recap.total_volume),
        Ring::new(RingKind::Exercise, recap.total_minutes),
        Ring::new(RingKind::Stand, recap.active_days as f64),
    ]
}
