//! Physical replay of a [`PlannedPath`].

use maze_core::{Coord, HeadingTracker, MouseAdapter, MouseError, Result, TickContext, WallReading};
use tracing::debug;

use crate::explore::{follow_corridor, is_fork};
use crate::planner::PlannedPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStep {
    Continue,
    /// Standing on the goal with every planned fork consumed.
    Arrived,
}

/// Corridors are wall-followed exactly as during exploration; each fork
/// consumes the next planned heading.
#[derive(Debug, Clone)]
pub struct Runner {
    plan: PlannedPath,
    goal_cell: Coord,
    index: usize,
}

impl Runner {
    pub fn new(plan: PlannedPath, goal_cell: Coord) -> Self {
        Self {
            plan,
            goal_cell,
            index: 0,
        }
    }

    pub fn plan(&self) -> &PlannedPath {
        &self.plan
    }

    /// Number of fork transitions made so far.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn step<A>(
        &mut self,
        ctx: &TickContext,
        tracker: &mut HeadingTracker,
        mouse: &mut A,
    ) -> Result<RunStep>
    where
        A: MouseAdapter + ?Sized,
    {
        let position = tracker.position();
        if position == self.goal_cell && self.index == self.plan.len() {
            return Ok(RunStep::Arrived);
        }

        let walls = WallReading::sense(mouse);
        if !is_fork(walls, position, Some(self.goal_cell)) {
            follow_corridor(tracker, walls, mouse)?;
            return Ok(RunStep::Continue);
        }

        let Some(&heading) = self.plan.headings.get(self.index) else {
            return Err(MouseError::PathIndexOutOfRange {
                index: self.index,
                len: self.plan.len(),
            });
        };
        debug!(
            tick = ctx.tick,
            fork = self.index,
            x = position.x,
            y = position.y,
            heading = %heading,
            "taking planned exit"
        );
        tracker.turn_to(mouse, heading);
        tracker.move_forward(mouse)?;
        self.index += 1;
        Ok(RunStep::Continue)
    }
}
