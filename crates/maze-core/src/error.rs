use thiserror::Error;

use crate::{Coord, Heading, MazeBounds};

/// Faults that end a run. None of them are retried: every tick is a
/// deterministic function of controller state and sensor input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MouseError {
    #[error("move refused at {at} facing {heading} although sensors reported the way open")]
    BlockedMove { at: Coord, heading: Heading },

    #[error("position {at} left the maze bounds {}x{}", bounds.width, bounds.height)]
    OutOfBounds { at: Coord, bounds: MazeBounds },

    #[error("run index {index} exceeds planned path length {len}")]
    PathIndexOutOfRange { index: usize, len: usize },

    #[error("goal node {goal} is not reachable from the start node")]
    DisconnectedGoal { goal: Coord },

    #[error("a node already exists at {at}")]
    DuplicateNode { at: Coord },

    #[error("cannot link node {node} to itself")]
    SelfLink { node: u32 },

    #[error("unknown node id {node}")]
    UnknownNode { node: u32 },

    #[error("no edge between stack nodes {from} and {to} to backtrack along")]
    MissingBacktrackEdge { from: Coord, to: Coord },

    #[error("tick budget of {ticks} exhausted before the run ended")]
    TickBudgetExhausted { ticks: u64 },
}

pub type Result<T> = std::result::Result<T, MouseError>;
