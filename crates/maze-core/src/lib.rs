//! Deterministic micromouse primitives: headings, coordinates, the host
//! collaborator contract and the heading tracker.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod adapter;
pub mod error;
pub mod heading;
pub mod tick;
pub mod tracker;

pub use adapter::{MazeBounds, MouseAdapter, WallReading};
pub use error::{MouseError, Result};
pub use heading::{Coord, Heading, Relative, Turn};
pub use tick::TickContext;
pub use tracker::HeadingTracker;
