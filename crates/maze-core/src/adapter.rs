use crate::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Host-provided maze dimensions; valid coordinates are `0..width` x `0..height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MazeBounds {
    pub width: u32,
    pub height: u32,
}

impl MazeBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as i64) < self.width as i64
            && (coord.y as i64) < self.height as i64
    }

    pub fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// The robot (physical or simulated) driven by the controller.
///
/// Every call is a single synchronous request. Wall sensing is relative to
/// the robot's current heading at its current cell.
pub trait MouseAdapter {
    /// Attempt one forward step; `false` if physically blocked.
    fn move_forward(&mut self) -> bool;
    fn turn_left(&mut self);
    fn turn_right(&mut self);

    fn is_wall_left(&self) -> bool;
    fn is_wall_forward(&self) -> bool;
    fn is_wall_right(&self) -> bool;

    /// Diagnostic line for the operator; no effect on control flow.
    fn print_ui(&mut self, text: &str);

    /// Completion notification. Called on every tick once the run has ended.
    fn found_finish(&mut self);

    /// Maze bounds, when the host knows them.
    fn bounds(&self) -> Option<MazeBounds> {
        None
    }

    /// Explicit goal-cell signal for the current cell.
    ///
    /// Hosts without one keep the default; pair them with a turn-streak
    /// goal predicate.
    fn at_goal(&self) -> bool {
        false
    }
}

/// One snapshot of the three relative wall sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WallReading {
    pub left: bool,
    pub forward: bool,
    pub right: bool,
}

impl WallReading {
    pub fn sense<A>(mouse: &A) -> Self
    where
        A: MouseAdapter + ?Sized,
    {
        Self {
            left: mouse.is_wall_left(),
            forward: mouse.is_wall_forward(),
            right: mouse.is_wall_right(),
        }
    }

    pub fn open_count(&self) -> usize {
        [self.left, self.forward, self.right]
            .iter()
            .filter(|wall| !**wall)
            .count()
    }

    pub fn is_wall(&self, relative: crate::Relative) -> bool {
        match relative {
            crate::Relative::Left => self.left,
            crate::Relative::Forward => self.forward,
            crate::Relative::Right => self.right,
        }
    }
}
