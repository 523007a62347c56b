//! Phase state machine: exploring, computing the shortest path, running it,
//! and the terminal END phase.

use core::fmt;

use maze_core::{Coord, HeadingTracker, MouseAdapter, MouseError, Result, TickContext};
use tracing::{error, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::MouseConfig;
use crate::explore::{ExploreStep, Explorer};
use crate::goal::GoalPredicate;
use crate::graph::{MazeGraph, NodeId};
use crate::planner::{plan_shortest_path, PlannedPath};
use crate::runner::{RunStep, Runner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    Exploring,
    ComputingShortestPath,
    RunningShortestPath,
    End,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Exploring => "exploring",
            Phase::ComputingShortestPath => "computing_shortest_path",
            Phase::RunningShortestPath => "running_shortest_path",
            Phase::End => "end",
        };
        f.write_str(name)
    }
}

/// Why the machine reached END.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// The shortest path was replayed onto the goal.
    Completed,
    /// The start cell has no open exit.
    MazeBlocked,
    /// Exploration finished without identifying a goal.
    NoDestination,
    Fault(MouseError),
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Completed => f.write_str("completed"),
            Termination::MazeBlocked => f.write_str("maze blocked"),
            Termination::NoDestination => f.write_str("no destination found"),
            Termination::Fault(err) => write!(f, "fault: {err}"),
        }
    }
}

/// The whole navigation agent, driven one tick at a time by the host.
///
/// Constructed in [`Phase::Exploring`] at the start cell `(0, 0)` facing
/// north, with an empty graph. All cross-tick state lives here.
pub struct Micromouse {
    config: MouseConfig,
    goal: Box<dyn GoalPredicate>,
    tracker: HeadingTracker,
    graph: MazeGraph,
    explorer: Explorer,
    goal_node: Option<NodeId>,
    runner: Option<Runner>,
    phase: Phase,
    termination: Option<Termination>,
    ticks: u64,
}

impl Micromouse {
    pub fn new(config: MouseConfig) -> Self {
        Self {
            goal: config.goal.predicate(),
            config,
            tracker: HeadingTracker::new(),
            graph: MazeGraph::new(),
            explorer: Explorer::new(),
            goal_node: None,
            runner: None,
            phase: Phase::Exploring,
            termination: None,
            ticks: 0,
        }
    }

    /// Replace the configured goal predicate.
    pub fn with_goal_predicate(mut self, goal: Box<dyn GoalPredicate>) -> Self {
        self.goal = goal;
        self
    }

    pub fn config(&self) -> &MouseConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn termination(&self) -> Option<&Termination> {
        self.termination.as_ref()
    }

    pub fn graph(&self) -> &MazeGraph {
        &self.graph
    }

    pub fn tracker(&self) -> &HeadingTracker {
        &self.tracker
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn path_trace(&self) -> &[NodeId] {
        self.explorer.path_trace()
    }

    pub fn distance_from_last_node(&self) -> u32 {
        self.explorer.distance_from_last_node()
    }

    pub fn goal_cell(&self) -> Option<Coord> {
        self.explorer.goal_cell()
    }

    pub fn plan(&self) -> Option<&PlannedPath> {
        self.runner.as_ref().map(|r| r.plan())
    }

    pub fn runner(&self) -> Option<&Runner> {
        self.runner.as_ref()
    }

    /// Ticks spent outside END.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::End
    }

    /// Advance by one host cycle.
    ///
    /// A fatal condition moves the machine to END and is returned; later
    /// ticks only repeat the completion signal.
    pub fn tick<A>(&mut self, mouse: &mut A) -> Result<Phase>
    where
        A: MouseAdapter + ?Sized,
    {
        if self.phase == Phase::End {
            mouse.found_finish();
            return Ok(Phase::End);
        }
        if self.ticks >= self.config.max_ticks {
            let err = MouseError::TickBudgetExhausted {
                ticks: self.config.max_ticks,
            };
            return Err(self.fail(mouse, err));
        }

        let ctx = TickContext::new(self.ticks);
        self.ticks += 1;

        let step = match self.phase {
            Phase::Exploring => self.explore(&ctx, mouse),
            Phase::ComputingShortestPath => self.compute(&ctx, mouse),
            Phase::RunningShortestPath => self.run(&ctx, mouse),
            Phase::End => Ok(()),
        };

        match step {
            Ok(()) => Ok(self.phase),
            Err(err) => Err(self.fail(mouse, err)),
        }
    }

    /// Tick until END and report why it ended.
    pub fn run_to_end<A>(&mut self, mouse: &mut A) -> Result<Termination>
    where
        A: MouseAdapter + ?Sized,
    {
        while self.tick(mouse)? != Phase::End {}
        Ok(self
            .termination
            .clone()
            .unwrap_or(Termination::Completed))
    }

    fn explore<A>(&mut self, ctx: &TickContext, mouse: &mut A) -> Result<()>
    where
        A: MouseAdapter + ?Sized,
    {
        let step = self.explorer.step(
            ctx,
            &mut self.tracker,
            &mut self.graph,
            &*self.goal,
            mouse,
        )?;

        match step {
            ExploreStep::Continue => {}
            ExploreStep::Blocked => {
                mouse.print_ui("Maze is completely blocked off!");
                self.end(mouse, Termination::MazeBlocked);
            }
            ExploreStep::Finished { goal: None } => {
                mouse.print_ui("Exploration complete. No destination found!");
                self.end(mouse, Termination::NoDestination);
            }
            ExploreStep::Finished { goal: Some(goal) } => {
                mouse.print_ui("Exploration complete. Running shortest path next.");
                mouse.found_finish();
                self.goal_node = Some(goal);
                self.transition(Phase::ComputingShortestPath);
            }
        }
        Ok(())
    }

    fn compute<A>(&mut self, ctx: &TickContext, mouse: &mut A) -> Result<()>
    where
        A: MouseAdapter + ?Sized,
    {
        let Some(goal) = self.goal_node else {
            mouse.print_ui("Exploration complete. No destination found!");
            self.end(mouse, Termination::NoDestination);
            return Ok(());
        };

        mouse.print_ui("Calculating shortest path...");
        let plan = plan_shortest_path(&mut self.graph, NodeId::START, goal)?;
        let goal_cell = self.graph.try_node(goal)?.coord();
        info!(
            tick = ctx.tick,
            distance = plan.distance,
            forks = plan.len(),
            x = goal_cell.x,
            y = goal_cell.y,
            "shortest path computed"
        );
        mouse.print_ui("Shortest path calculated!");

        self.runner = Some(Runner::new(plan, goal_cell));
        self.transition(Phase::RunningShortestPath);
        Ok(())
    }

    fn run<A>(&mut self, ctx: &TickContext, mouse: &mut A) -> Result<()>
    where
        A: MouseAdapter + ?Sized,
    {
        let Some(runner) = self.runner.as_mut() else {
            return Err(MouseError::PathIndexOutOfRange { index: 0, len: 0 });
        };

        if runner.step(ctx, &mut self.tracker, mouse)? == RunStep::Arrived {
            mouse.print_ui("Done.");
            self.end(mouse, Termination::Completed);
        }
        Ok(())
    }

    fn transition(&mut self, next: Phase) {
        info!(from = %self.phase, to = %next, tick = self.ticks, "phase transition");
        self.phase = next;
    }

    fn end<A>(&mut self, mouse: &mut A, termination: Termination)
    where
        A: MouseAdapter + ?Sized,
    {
        info!(reason = %termination, tick = self.ticks, "run ended");
        self.transition(Phase::End);
        self.termination = Some(termination);
        mouse.found_finish();
    }

    fn fail<A>(&mut self, mouse: &mut A, err: MouseError) -> MouseError
    where
        A: MouseAdapter + ?Sized,
    {
        error!(error = %err, phase = %self.phase, tick = self.ticks, "fatal fault");
        mouse.print_ui(&format!("Fatal: {err}"));
        self.end(mouse, Termination::Fault(err.clone()));
        err
    }
}

impl fmt::Debug for Micromouse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Micromouse")
            .field("phase", &self.phase)
            .field("ticks", &self.ticks)
            .field("position", &self.tracker.position())
            .field("heading", &self.tracker.heading())
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .field("termination", &self.termination)
            .finish()
    }
}
