//! Controller configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::goal::{GoalPredicate, HostSignalGoal, TurnStreakGoal};

/// How the explorer recognises the goal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum GoalDetection {
    /// Use the adapter's `at_goal` signal.
    #[default]
    HostSignal,
    /// Infer the goal from consecutive same-direction corridor turns.
    TurnStreak {
        #[cfg_attr(feature = "serde", serde(default = "default_streak_turns"))]
        turns: u32,
    },
}

impl GoalDetection {
    pub fn predicate(self) -> Box<dyn GoalPredicate> {
        match self {
            GoalDetection::HostSignal => Box::new(HostSignalGoal),
            GoalDetection::TurnStreak { turns } => Box::new(TurnStreakGoal { turns }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MouseConfig {
    /// Ticks allowed before the run is aborted as runaway.
    pub max_ticks: u64,
    pub goal: GoalDetection,
}

#[cfg(feature = "serde")]
fn default_streak_turns() -> u32 {
    3
}

fn default_max_ticks() -> u64 {
    100_000
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            goal: GoalDetection::default(),
        }
    }
}

impl MouseConfig {
    pub fn with_goal(mut self, goal: GoalDetection) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }
}
