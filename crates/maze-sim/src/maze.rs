use std::collections::BTreeSet;
use std::fmt;

use maze_core::{Coord, Heading, MazeBounds};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rng::{DeterministicRng, SplitMix64};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeParseError {
    #[error("maze text is empty")]
    Empty,

    #[error("line {line}: expected a wall line like `+---+---+`")]
    BadWallLine { line: usize },

    #[error("expected alternating wall and cell lines ending in a wall line, found {found} lines")]
    LineCount { found: usize },
}

/// Rectangular wall grid. The outer boundary is always walled.
///
/// Each cell stores the walls on its north and east sides; the south and
/// west walls belong to the neighbouring cells.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Maze {
    width: u32,
    height: u32,
    north: Vec<bool>,
    east: Vec<bool>,
    goals: BTreeSet<Coord>,
}

impl Maze {
    /// Grid with no interior walls.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    pub fn open(width: u32, height: u32) -> Self {
        Self::filled(width, height, false)
    }

    /// Grid with every interior wall present.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    pub fn closed(width: u32, height: u32) -> Self {
        Self::filled(width, height, true)
    }

    fn filled(width: u32, height: u32, wall: bool) -> Self {
        assert!(width > 0 && height > 0, "maze must be non-empty");
        let cells = width as usize * height as usize;
        // Boundary slots are stored walled so equal grids compare equal.
        let north = (0..cells)
            .map(|i| wall || i / width as usize == height as usize - 1)
            .collect();
        let east = (0..cells)
            .map(|i| wall || i % width as usize == width as usize - 1)
            .collect();
        Self {
            width,
            height,
            north,
            east,
            goals: BTreeSet::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> MazeBounds {
        MazeBounds::new(self.width, self.height)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.bounds().contains(coord)
    }

    fn idx(&self, coord: Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.y as usize * self.width as usize + coord.x as usize)
    }

    pub fn has_wall(&self, coord: Coord, heading: Heading) -> bool {
        let neighbor = coord.step(heading);
        let (Some(here), Some(there)) = (self.idx(coord), self.idx(neighbor)) else {
            return true;
        };
        match heading {
            Heading::North => self.north[here],
            Heading::South => self.north[there],
            Heading::East => self.east[here],
            Heading::West => self.east[there],
        }
    }

    /// Set the wall between `coord` and its neighbour; boundary walls are fixed.
    pub fn set_wall(&mut self, coord: Coord, heading: Heading, wall: bool) {
        let neighbor = coord.step(heading);
        let (Some(here), Some(there)) = (self.idx(coord), self.idx(neighbor)) else {
            return;
        };
        match heading {
            Heading::North => self.north[here] = wall,
            Heading::South => self.north[there] = wall,
            Heading::East => self.east[here] = wall,
            Heading::West => self.east[there] = wall,
        }
    }

    pub fn open_exits(&self, coord: Coord) -> usize {
        Heading::ALL
            .into_iter()
            .filter(|h| !self.has_wall(coord, *h))
            .count()
    }

    pub fn set_goal(&mut self, coord: Coord) {
        if self.contains(coord) {
            self.goals.insert(coord);
        }
    }

    pub fn is_goal(&self, coord: Coord) -> bool {
        self.goals.contains(&coord)
    }

    pub fn goals(&self) -> impl Iterator<Item = Coord> + '_ {
        self.goals.iter().copied()
    }

    /// Spanning-tree maze (recursive backtracker from the start cell) with
    /// `extra_openings` further interior walls removed to create loops. The
    /// goal is the centre cell.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    pub fn carve(width: u32, height: u32, seed: u64, extra_openings: usize) -> Self {
        let mut maze = Self::closed(width, height);
        let mut rng = SplitMix64::new(seed);

        let mut visited = vec![false; width as usize * height as usize];
        visited[0] = true;
        let mut stack = vec![Coord::ORIGIN];
        while let Some(&current) = stack.last() {
            let options: Vec<Heading> = Heading::ALL
                .into_iter()
                .filter(|h| {
                    maze.idx(current.step(*h))
                        .map(|i| !visited[i])
                        .unwrap_or(false)
                })
                .collect();
            if options.is_empty() {
                stack.pop();
                continue;
            }
            let heading = options[rng.next_below(options.len())];
            let next = current.step(heading);
            maze.set_wall(current, heading, false);
            if let Some(i) = maze.idx(next) {
                visited[i] = true;
            }
            stack.push(next);
        }

        let mut walls: Vec<(Coord, Heading)> = Vec::new();
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let cell = Coord::new(x, y);
                for heading in [Heading::North, Heading::East] {
                    if maze.contains(cell.step(heading)) && maze.has_wall(cell, heading) {
                        walls.push((cell, heading));
                    }
                }
            }
        }
        rng.shuffle(&mut walls);
        for (cell, heading) in walls.into_iter().take(extra_openings) {
            maze.set_wall(cell, heading, false);
        }

        maze.set_goal(Coord::new((width / 2) as i32, (height / 2) as i32));
        maze
    }

    /// Parse the ASCII format written by [`Display`](fmt::Display).
    ///
    /// ```text
    /// +---+---+
    /// | G     |
    /// +   +---+
    /// |       |
    /// +---+---+
    /// ```
    ///
    /// The first cell line is the top row (`y = height - 1`); `---` is a
    /// wall, three spaces an opening, `|` a wall between cells, and a `G`
    /// inside a cell marks it as a goal.
    pub fn parse(text: &str) -> Result<Self, MazeParseError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .skip_while(|l| l.trim().is_empty())
            .collect();
        let lines: Vec<&str> = match lines.iter().rposition(|l| !l.trim().is_empty()) {
            Some(last) => lines[..=last].to_vec(),
            None => return Err(MazeParseError::Empty),
        };

        if lines.len() < 3 || lines.len() % 2 == 0 {
            return Err(MazeParseError::LineCount { found: lines.len() });
        }
        let first = lines[0].trim_end();
        if !first.starts_with('+') || first.len() < 5 || (first.len() - 1) % 4 != 0 {
            return Err(MazeParseError::BadWallLine { line: 1 });
        }

        let width = ((first.len() - 1) / 4) as u32;
        let height = ((lines.len() - 1) / 2) as u32;
        let mut maze = Self::open(width, height);

        for (line_no, line) in lines.iter().enumerate() {
            let bytes = line.as_bytes();
            let at = |i: usize| bytes.get(i).copied().unwrap_or(b' ');
            let row = (line_no / 2) as u32;

            if line_no % 2 == 0 {
                if at(0) != b'+' {
                    return Err(MazeParseError::BadWallLine { line: line_no + 1 });
                }
                // Wall line `row` separates top-based rows `row - 1` and `row`.
                if row == 0 || row == height {
                    continue;
                }
                let y = (height - 1 - row) as i32;
                for c in 0..width as usize {
                    let wall = at(4 * c + 2) == b'-';
                    maze.set_wall(Coord::new(c as i32, y), Heading::North, wall);
                }
            } else {
                let y = (height - 1 - row) as i32;
                for c in 0..width as usize {
                    let cell = Coord::new(c as i32, y);
                    if c > 0 {
                        maze.set_wall(cell, Heading::West, at(4 * c) == b'|');
                    }
                    if (1..4).any(|i| matches!(at(4 * c + i), b'G' | b'g')) {
                        maze.set_goal(cell);
                    }
                }
            }
        }

        Ok(maze)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            let y = (self.height - 1 - row) as i32;

            for x in 0..self.width as i32 {
                let wall = self.has_wall(Coord::new(x, y), Heading::North);
                f.write_str(if wall { "+---" } else { "+   " })?;
            }
            f.write_str("+\n")?;

            for x in 0..self.width as i32 {
                let cell = Coord::new(x, y);
                f.write_str(if self.has_wall(cell, Heading::West) { "|" } else { " " })?;
                f.write_str(if self.is_goal(cell) { " G " } else { "   " })?;
            }
            f.write_str("|\n")?;
        }

        for _ in 0..self.width {
            f.write_str("+---")?;
        }
        f.write_str("+\n")
    }
}
