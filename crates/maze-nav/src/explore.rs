//! Depth-first, wall-following exploration that grows the [`MazeGraph`].
//!
//! Corridor cells are walked with a fixed left/forward/right/reverse
//! priority and never touch the graph. Fork cells (two or more open
//! relative exits, the start cell, or the goal cell) are resolved against
//! the graph: new coordinates become nodes, the stack top picks its next
//! unexplored exit or backtracks, and any other known node closes a loop.

use maze_core::{
    Coord, Heading, HeadingTracker, MouseAdapter, MouseError, Relative, Result, TickContext, Turn,
    WallReading,
};
use tracing::debug;

use crate::goal::{GoalPredicate, GoalProbe, TurnStreak};
use crate::graph::{MazeGraph, NodeId};

/// Outcome of one exploring tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreStep {
    Continue,
    /// The start cell has no open exit.
    Blocked,
    /// The traversal stack emptied; every reachable fork has been explored.
    Finished { goal: Option<NodeId> },
}

/// The single move made in a corridor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorridorMove {
    Left,
    Forward,
    Right,
    Reverse,
}

/// Wall-follow one corridor cell: left if open, else forward, else right,
/// else turn around.
pub fn follow_corridor<A>(
    tracker: &mut HeadingTracker,
    walls: WallReading,
    mouse: &mut A,
) -> Result<CorridorMove>
where
    A: MouseAdapter + ?Sized,
{
    let choice = if !walls.left {
        tracker.turn_left(mouse);
        CorridorMove::Left
    } else if !walls.forward {
        CorridorMove::Forward
    } else if !walls.right {
        tracker.turn_right(mouse);
        CorridorMove::Right
    } else {
        tracker.turn_around(mouse);
        CorridorMove::Reverse
    };
    tracker.move_forward(mouse)?;
    Ok(choice)
}

/// Whether the cell must be resolved against the graph.
pub(crate) fn is_fork(walls: WallReading, position: Coord, goal: Option<Coord>) -> bool {
    walls.open_count() >= 2 || position.is_origin() || goal == Some(position)
}

/// Exploring-phase state carried between ticks: the node stack and the
/// corridor walked since the last node.
#[derive(Debug, Clone)]
pub struct Explorer {
    initialized: bool,
    path_trace: Vec<NodeId>,
    direction_from_last_node: Heading,
    distance_from_last_node: u32,
    /// Exit most recently taken onto unexplored ground, and the node it left.
    pending_exit: Option<(NodeId, Heading)>,
    turn_streak: TurnStreak,
    goal_cell: Option<Coord>,
}

impl Default for Explorer {
    fn default() -> Self {
        Self {
            initialized: false,
            path_trace: Vec::new(),
            direction_from_last_node: Heading::North,
            distance_from_last_node: 0,
            pending_exit: None,
            turn_streak: TurnStreak::default(),
            goal_cell: None,
        }
    }
}

impl Explorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path_trace(&self) -> &[NodeId] {
        &self.path_trace
    }

    pub fn direction_from_last_node(&self) -> Heading {
        self.direction_from_last_node
    }

    pub fn distance_from_last_node(&self) -> u32 {
        self.distance_from_last_node
    }

    pub fn turn_streak(&self) -> TurnStreak {
        self.turn_streak
    }

    pub fn goal_cell(&self) -> Option<Coord> {
        self.goal_cell
    }

    pub fn step<A>(
        &mut self,
        ctx: &TickContext,
        tracker: &mut HeadingTracker,
        graph: &mut MazeGraph,
        goal: &dyn GoalPredicate,
        mouse: &mut A,
    ) -> Result<ExploreStep>
    where
        A: MouseAdapter + ?Sized,
    {
        if !self.initialized {
            self.initialized = true;
            if self.seed_start(tracker, graph, mouse)? {
                return Ok(ExploreStep::Blocked);
            }
        }

        let Some(&top) = self.path_trace.last() else {
            return Ok(ExploreStep::Finished {
                goal: self.goal_node(graph),
            });
        };

        let walls = WallReading::sense(mouse);
        let position = tracker.position();
        let known = graph.find_node_at(position);
        self.observe_goal(ctx, position, known == Some(top), goal, mouse);

        if !is_fork(walls, position, self.goal_cell) {
            let choice = follow_corridor(tracker, walls, mouse)?;
            self.distance_from_last_node += 1;
            match choice {
                CorridorMove::Left => self.turn_streak.record_turn(Turn::Left),
                CorridorMove::Right => self.turn_streak.record_turn(Turn::Right),
                CorridorMove::Forward | CorridorMove::Reverse => self.turn_streak.reset(),
            }
            return Ok(ExploreStep::Continue);
        }

        match known {
            None => self.discover_node(ctx, tracker, graph, walls, top),
            Some(id) if id == top => self.advance_from_top(ctx, tracker, graph, top, mouse),
            Some(id) => self.close_loop(ctx, tracker, graph, id, top),
        }
    }

    /// Create the start node and record what the start cell's sensors show.
    ///
    /// Returns `true` when no exit is open.
    fn seed_start<A>(
        &mut self,
        tracker: &HeadingTracker,
        graph: &mut MazeGraph,
        mouse: &mut A,
    ) -> Result<bool>
    where
        A: MouseAdapter + ?Sized,
    {
        let start = graph.create_node(tracker.position())?;
        self.path_trace.push(start);

        let walls = WallReading::sense(mouse);
        let heading = tracker.heading();
        let node = graph.try_node_mut(start)?;
        node.mark_explored(heading.reverse());
        for relative in Relative::PRIORITY {
            if walls.is_wall(relative) {
                node.mark_explored(heading.turned(relative));
            }
        }

        Ok(node.is_fully_explored())
    }

    fn observe_goal<A>(
        &mut self,
        ctx: &TickContext,
        position: Coord,
        on_stack_top: bool,
        goal: &dyn GoalPredicate,
        mouse: &mut A,
    ) where
        A: MouseAdapter + ?Sized,
    {
        if self.goal_cell.is_some() {
            return;
        }
        let probe = GoalProbe {
            position,
            on_stack_top,
            turn_streak: self.turn_streak,
            host_signal: mouse.at_goal(),
        };
        if goal.is_goal(&probe) {
            self.goal_cell = Some(position);
            tracing::info!(tick = ctx.tick, x = position.x, y = position.y, "Found finish");
            mouse.print_ui("Found finish!");
        }
    }

    fn discover_node(
        &mut self,
        ctx: &TickContext,
        tracker: &HeadingTracker,
        graph: &mut MazeGraph,
        walls: WallReading,
        top: NodeId,
    ) -> Result<ExploreStep> {
        let position = tracker.position();
        let heading = tracker.heading();

        let id = graph.create_node(position)?;
        graph.link(
            top,
            self.direction_from_last_node,
            id,
            heading.reverse(),
            self.distance_from_last_node,
        )?;
        debug!(
            tick = ctx.tick,
            node = id.0,
            x = position.x,
            y = position.y,
            distance = self.distance_from_last_node,
            "discovered node"
        );
        self.distance_from_last_node = 0;

        let node = graph.try_node_mut(id)?;
        for relative in Relative::PRIORITY {
            if walls.is_wall(relative) {
                node.mark_explored(heading.turned(relative));
            }
        }

        self.path_trace.push(id);
        self.pending_exit = None;
        self.turn_streak.reset();
        Ok(ExploreStep::Continue)
    }

    fn advance_from_top<A>(
        &mut self,
        ctx: &TickContext,
        tracker: &mut HeadingTracker,
        graph: &mut MazeGraph,
        top: NodeId,
        mouse: &mut A,
    ) -> Result<ExploreStep>
    where
        A: MouseAdapter + ?Sized,
    {
        let arrived = tracker.heading();
        let node = graph.try_node_mut(top)?;
        if let Some((left_from, exit)) = self.pending_exit.take() {
            if left_from == top {
                node.mark_explored(exit);
            }
        }
        node.mark_explored(arrived.reverse());

        if let Some(next) = node.first_unexplored() {
            self.direction_from_last_node = next;
            self.distance_from_last_node = 1;
            self.pending_exit = Some((top, next));
            self.turn_streak.reset();
            tracker.turn_to(mouse, next);
            tracker.move_forward(mouse)?;
            return Ok(ExploreStep::Continue);
        }

        self.path_trace.pop();
        let Some(&parent) = self.path_trace.last() else {
            return Ok(self.finish(ctx, tracker, graph, mouse));
        };

        let from = graph.try_node(top)?.coord();
        let heading = graph
            .edge_between(parent, top)
            .and_then(|edge| edge.heading_at(top))
            .ok_or_else(|| MouseError::MissingBacktrackEdge {
                from,
                to: graph.node(parent).map(|n| n.coord()).unwrap_or(from),
            })?;
        debug!(
            tick = ctx.tick,
            node = top.0,
            parent = parent.0,
            heading = %heading,
            "node exhausted, backtracking"
        );

        self.direction_from_last_node = heading;
        self.distance_from_last_node = 1;
        self.pending_exit = None;
        self.turn_streak.reset();
        tracker.turn_to(mouse, heading);
        tracker.move_forward(mouse)?;
        Ok(ExploreStep::Continue)
    }

    fn close_loop(
        &mut self,
        ctx: &TickContext,
        tracker: &HeadingTracker,
        graph: &mut MazeGraph,
        found: NodeId,
        top: NodeId,
    ) -> Result<ExploreStep> {
        graph.link(
            found,
            tracker.heading().reverse(),
            top,
            self.direction_from_last_node,
            self.distance_from_last_node,
        )?;
        debug!(
            tick = ctx.tick,
            node = found.0,
            from = top.0,
            distance = self.distance_from_last_node,
            "closed loop onto known node"
        );
        self.distance_from_last_node = 0;
        self.path_trace.push(found);
        self.pending_exit = None;
        self.turn_streak.reset();
        Ok(ExploreStep::Continue)
    }

    fn finish<A>(
        &mut self,
        ctx: &TickContext,
        tracker: &mut HeadingTracker,
        graph: &MazeGraph,
        mouse: &mut A,
    ) -> ExploreStep
    where
        A: MouseAdapter + ?Sized,
    {
        tracker.turn_to(mouse, Heading::North);
        let goal = self.goal_node(graph);
        debug!(
            tick = ctx.tick,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            goal = ?goal,
            "exploration stack empty"
        );
        ExploreStep::Finished { goal }
    }

    fn goal_node(&self, graph: &MazeGraph) -> Option<NodeId> {
        self.goal_cell.and_then(|cell| graph.find_node_at(cell))
    }
}
