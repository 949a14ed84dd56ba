//! Gravity slide moves

use std::fmt;

use crate::grid::{Cell, Grid, Point};

/// Edge of the board that all pieces slide towards
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Successor generation order used by the search
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Board position `depth` cells away from the destination edge, on lane `lane`.
    ///
    /// Lanes are columns for vertical slides and rows for horizontal ones.
    fn position(self, size: usize, lane: usize, depth: usize) -> Point {
        match self {
            Direction::Up => Point { y: depth, x: lane },
            Direction::Down => Point {
                y: size - 1 - depth,
                x: lane,
            },
            Direction::Left => Point { y: lane, x: depth },
            Direction::Right => Point {
                y: lane,
                x: size - 1 - depth,
            },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

impl Grid {
    /// Slide every piece towards `direction`, returning the new grid.
    ///
    /// `self` is left untouched.
    ///
    /// # Examples
    /// ```
    /// use slide_level::{Direction, Grid};
    /// let grid = Grid::parse_rows("\"M P\",\n\"   \",\n\"   \",").unwrap();
    /// let moved = grid.slide(Direction::Left);
    /// assert_eq!(moved.to_string(), "\"MP \",\n\"   \",\n\"   \",\n");
    /// ```
    pub fn slide(&self, direction: Direction) -> Grid {
        let mut next = self.clone();
        next.slide_in_place(direction);
        next
    }

    /// Slide every piece towards `direction`, mutating the grid.
    ///
    /// Pieces closest to the destination edge are moved first, so a chain
    /// of pieces compacts in a single pass. Each piece travels until it
    /// meets the edge or any non-empty cell.
    pub fn slide_in_place(&mut self, direction: Direction) {
        let size = self.size();
        for depth in 1..size {
            for lane in 0..size {
                let from = direction.position(size, lane, depth);
                if !self.get(from.y, from.x).is_piece() {
                    continue;
                }
                let mut current = depth;
                while current > 0 {
                    let here = direction.position(size, lane, current);
                    let ahead = direction.position(size, lane, current - 1);
                    if self.get(ahead.y, ahead.x) != Cell::Empty {
                        break;
                    }
                    self.swap(here, ahead);
                    current -= 1;
                }
            }
        }
    }
}
