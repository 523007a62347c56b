use maze_core::{Coord, Heading, MazeBounds, MouseAdapter};
use tracing::{trace, warn};

use crate::Maze;

/// Simulated robot starting at `(0, 0)` facing north.
#[derive(Debug, Clone)]
pub struct SimMouse {
    maze: Maze,
    position: Coord,
    heading: Heading,
    moves: u64,
    turns: u64,
    bumps: u64,
    trail: Vec<Coord>,
    ui: Vec<String>,
    finish_signals: u64,
}

impl SimMouse {
    pub fn new(maze: Maze) -> Self {
        Self {
            maze,
            position: Coord::ORIGIN,
            heading: Heading::North,
            moves: 0,
            turns: 0,
            bumps: 0,
            trail: Vec::new(),
            ui: Vec::new(),
            finish_signals: 0,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Refused forward moves.
    pub fn bumps(&self) -> u64 {
        self.bumps
    }

    /// Every cell entered, in order.
    pub fn trail(&self) -> &[Coord] {
        &self.trail
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    pub fn ui_lines(&self) -> &[String] {
        &self.ui
    }

    pub fn finish_signals(&self) -> u64 {
        self.finish_signals
    }

    fn wall(&self, heading: Heading) -> bool {
        self.maze.has_wall(self.position, heading)
    }
}

impl MouseAdapter for SimMouse {
    fn move_forward(&mut self) -> bool {
        if self.wall(self.heading) {
            self.bumps += 1;
            warn!(
                x = self.position.x,
                y = self.position.y,
                heading = %self.heading,
                "simulated mouse bumped into a wall"
            );
            return false;
        }
        self.position = self.position.step(self.heading);
        self.moves += 1;
        self.trail.push(self.position);
        trace!(x = self.position.x, y = self.position.y, "moved");
        true
    }

    fn turn_left(&mut self) {
        self.heading = self.heading.left();
        self.turns += 1;
    }

    fn turn_right(&mut self) {
        self.heading = self.heading.right();
        self.turns += 1;
    }

    fn is_wall_left(&self) -> bool {
        self.wall(self.heading.left())
    }

    fn is_wall_forward(&self) -> bool {
        self.wall(self.heading)
    }

    fn is_wall_right(&self) -> bool {
        self.wall(self.heading.right())
    }

    fn print_ui(&mut self, text: &str) {
        self.ui.push(text.to_string());
    }

    fn found_finish(&mut self) {
        self.finish_signals += 1;
    }

    fn bounds(&self) -> Option<MazeBounds> {
        Some(self.maze.bounds())
    }

    fn at_goal(&self) -> bool {
        self.maze.is_goal(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensors_are_relative_to_heading() {
        let mut maze = Maze::open(2, 2);
        maze.set_wall(Coord::ORIGIN, Heading::East, true);
        let mut mouse = SimMouse::new(maze);

        // Facing north at the corner: west is the boundary, east is walled.
        assert!(mouse.is_wall_left());
        assert!(!mouse.is_wall_forward());
        assert!(mouse.is_wall_right());

        mouse.turn_right();
        assert!(mouse.is_wall_forward());
        assert!(!mouse.move_forward());
        assert_eq!(mouse.bumps(), 1);
        assert_eq!(mouse.position(), Coord::ORIGIN);
    }

    #[test]
    fn moves_are_recorded_on_the_trail() {
        let mut mouse = SimMouse::new(Maze::open(3, 3));
        assert!(mouse.move_forward());
        mouse.turn_right();
        assert!(mouse.move_forward());
        assert_eq!(mouse.trail(), &[Coord::new(0, 1), Coord::new(1, 1)]);
        assert_eq!(mouse.moves(), 2);
        assert_eq!(mouse.turns(), 1);
    }
}
