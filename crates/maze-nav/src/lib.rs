//! Micromouse navigation: maze graph, depth-first exploration, shortest-path
//! planning and replay, sequenced by a tick-driven phase machine.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod explore;
pub mod goal;
pub mod graph;
pub mod planner;
pub mod runner;

pub use config::{GoalDetection, MouseConfig};
pub use controller::{Micromouse, Phase, Termination};
pub use explore::{ExploreStep, Explorer};
pub use goal::{GoalPredicate, GoalProbe, HostSignalGoal, TurnStreak, TurnStreakGoal};
pub use graph::{Edge, EdgeId, MazeGraph, Node, NodeId};
pub use planner::{plan_shortest_path, PlannedPath};
pub use runner::{RunStep, Runner};

pub use maze_core::{Coord, Heading, MouseAdapter, MouseError, Result};
