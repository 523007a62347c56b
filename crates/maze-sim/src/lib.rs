//! Simulated micromouse host: a wall grid, its ASCII file format, and a
//! robot that answers the controller's sensor and motion requests.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod maze;
pub mod mouse;
pub mod rng;

pub use maze::{Maze, MazeParseError};
pub use mouse::SimMouse;
pub use rng::{DeterministicRng, SplitMix64};
