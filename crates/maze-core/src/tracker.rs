use crate::{Coord, Heading, MouseAdapter, MouseError, Result, Turn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute pose of the mouse, kept in lockstep with the adapter.
///
/// Every turn request updates the heading; the coordinate only changes once
/// the adapter confirms a forward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeadingTracker {
    heading: Heading,
    position: Coord,
}

impl Default for HeadingTracker {
    fn default() -> Self {
        Self {
            heading: Heading::North,
            position: Coord::ORIGIN,
        }
    }
}

impl HeadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn turn_left<A>(&mut self, mouse: &mut A)
    where
        A: MouseAdapter + ?Sized,
    {
        mouse.turn_left();
        self.heading = self.heading.left();
    }

    pub fn turn_right<A>(&mut self, mouse: &mut A)
    where
        A: MouseAdapter + ?Sized,
    {
        mouse.turn_right();
        self.heading = self.heading.right();
    }

    pub fn turn<A>(&mut self, mouse: &mut A, turn: Turn)
    where
        A: MouseAdapter + ?Sized,
    {
        match turn {
            Turn::Left => self.turn_left(mouse),
            Turn::Right => self.turn_right(mouse),
        }
    }

    pub fn turn_around<A>(&mut self, mouse: &mut A)
    where
        A: MouseAdapter + ?Sized,
    {
        self.turn_right(mouse);
        self.turn_right(mouse);
    }

    /// Rotate toward `target` along the shorter arc; half turns go right twice.
    ///
    /// Returns the number of quarter turns requested.
    pub fn turn_to<A>(&mut self, mouse: &mut A, target: Heading) -> u8
    where
        A: MouseAdapter + ?Sized,
    {
        match self.heading.quarter_turns_to(target) {
            0 => 0,
            -1 => {
                self.turn_left(mouse);
                1
            }
            1 => {
                self.turn_right(mouse);
                1
            }
            _ => {
                self.turn_around(mouse);
                2
            }
        }
    }

    /// Request one forward step and advance the coordinate on success.
    pub fn move_forward<A>(&mut self, mouse: &mut A) -> Result<Coord>
    where
        A: MouseAdapter + ?Sized,
    {
        if !mouse.move_forward() {
            return Err(MouseError::BlockedMove {
                at: self.position,
                heading: self.heading,
            });
        }

        self.position = self.position.step(self.heading);
        if let Some(bounds) = mouse.bounds() {
            if !bounds.contains(self.position) {
                return Err(MouseError::OutOfBounds {
                    at: self.position,
                    bounds,
                });
            }
        }
        Ok(self.position)
    }
}
