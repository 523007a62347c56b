//! Goal-cell detection during exploration.

use maze_core::{Coord, Turn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Run of consecutive same-direction corridor turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TurnStreak {
    pub turn: Option<Turn>,
    pub count: u32,
}

impl TurnStreak {
    pub fn record_turn(&mut self, turn: Turn) {
        if self.turn == Some(turn) {
            self.count += 1;
        } else {
            self.turn = Some(turn);
            self.count = 1;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// What the explorer knows about the current cell when asking for the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProbe {
    pub position: Coord,
    /// The cell is the node on top of the traversal stack.
    pub on_stack_top: bool,
    pub turn_streak: TurnStreak,
    /// The host's explicit goal signal for this cell.
    pub host_signal: bool,
}

pub trait GoalPredicate {
    fn is_goal(&self, probe: &GoalProbe) -> bool;
}

/// Trusts the adapter's explicit goal signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostSignalGoal;

impl GoalPredicate for HostSignalGoal {
    fn is_goal(&self, probe: &GoalProbe) -> bool {
        probe.host_signal
    }
}

/// Infers the goal from turn parity: arriving back at the stack-top node
/// after exactly `turns` consecutive same-direction corridor turns.
///
/// This is a heuristic; it only fits mazes whose goal room produces that
/// turning pattern.
#[derive(Debug, Clone, Copy)]
pub struct TurnStreakGoal {
    pub turns: u32,
}

impl Default for TurnStreakGoal {
    fn default() -> Self {
        Self { turns: 3 }
    }
}

impl GoalPredicate for TurnStreakGoal {
    fn is_goal(&self, probe: &GoalProbe) -> bool {
        probe.on_stack_top && probe.turn_streak.count == self.turns
    }
}
