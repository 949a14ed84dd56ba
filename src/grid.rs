//! Puzzle board model

use std::fmt;

use anyhow::{anyhow, bail};
use itertools::Itertools;

/// Content of a single board position
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub enum Cell {
    /// Nothing here, pieces may slide through
    #[default]
    Empty,
    /// The piece that has to reach the target position
    Goal,
    /// Obstacle that never moves
    Stationary,
    /// Obstacle that slides like the goal piece
    Movable,
}

impl Cell {
    const C_EMPTY: char = ' ';
    const C_GOAL: char = 'P';
    const C_STATIONARY: char = 'S';
    const C_MOVABLE: char = 'M';

    /// Whether slide moves carry this cell along
    pub fn is_piece(self) -> bool {
        matches!(self, Cell::Goal | Cell::Movable)
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => Self::C_EMPTY,
            Cell::Goal => Self::C_GOAL,
            Cell::Stationary => Self::C_STATIONARY,
            Cell::Movable => Self::C_MOVABLE,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            Self::C_EMPTY => Some(Cell::Empty),
            Self::C_GOAL => Some(Cell::Goal),
            Self::C_STATIONARY => Some(Cell::Stationary),
            Self::C_MOVABLE => Some(Cell::Movable),
            _ => None,
        }
    }
}

/// Location on the board
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Point {
    pub y: usize,
    pub x: usize,
}

/// Square board of cells, holding exactly one [`Cell::Goal`]
///
/// Equality and hashing are structural over the cell sequence, so a grid
/// can be used directly as a visited-set key.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Grid {
    size: usize,
    /// Row-major cells, `size * size` long
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from row-major cells.
    ///
    /// Returns error if `cells` does not fill a non-empty `size` x `size`
    /// board, or if the board does not hold exactly one goal piece.
    pub fn new(size: usize, cells: Vec<Cell>) -> anyhow::Result<Self> {
        if size == 0 {
            bail!("Grid must have at least one cell");
        }
        let Some(cell_count) = size.checked_mul(size) else {
            bail!("Grid size {} is too large", size);
        };
        if cells.len() != cell_count {
            bail!(
                "Grid of size {} needs {} cells, got {}",
                size,
                cell_count,
                cells.len()
            );
        }
        let goals = cells.iter().filter(|c| **c == Cell::Goal).count();
        match goals {
            1 => Ok(Self { size, cells }),
            0 => Err(anyhow!("Goal piece not found in grid")),
            n => Err(anyhow!(format!("Grid holds {} goal pieces, expected one", n))),
        }
    }

    /// Build a grid from a list of rows.
    ///
    /// Returns error if the rows do not form a square, see [`Grid::new`].
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> anyhow::Result<Self> {
        let size = rows.len();
        if let Some((y, row)) = rows.iter().find_position(|row| row.len() != size) {
            bail!(
                "Grid is not square: row {} has {} cells, expected {}",
                y,
                row.len(),
                size
            );
        }
        Self::new(size, rows.into_iter().flatten().collect())
    }

    /// Parse the rendered text form, as produced by [`fmt::Display`].
    ///
    /// Each non-empty line is one row. Surrounding double quotes and a
    /// trailing comma are stripped when present, so both
    /// `"P S",` and `P S` are accepted. A line of spaces is a row of
    /// empty cells.
    ///
    /// # Examples
    /// ```
    /// use slide_level::{Cell, Grid};
    /// let grid = Grid::parse_rows("\"M P\",\n\"   \",\n\" S \",").unwrap();
    /// assert_eq!(grid.size(), 3);
    /// assert_eq!(grid.get(0, 2), Cell::Goal);
    /// ```
    pub fn parse_rows(text: &str) -> anyhow::Result<Self> {
        let rows = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(Self::strip_row_decoration)
            .enumerate()
            .map(|(y, line)| {
                line.chars()
                    .enumerate()
                    .map(|(x, c)| {
                        Cell::from_char(c).ok_or_else(|| {
                            anyhow!(format!("Unexpected character `{}` at y={}, x={}", c, y, x))
                        })
                    })
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    fn strip_row_decoration(line: &str) -> &str {
        let trimmed = line.trim();
        let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
        match trimmed
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            Some(inner) => inner,
            // Unquoted rows keep their inner whitespace
            None => line.trim_end_matches(['\r', ',']),
        }
    }

    /// Board side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at row `y`, column `x`
    pub fn get(&self, y: usize, x: usize) -> Cell {
        self.cells[y * self.size + x]
    }

    pub(crate) fn swap(&mut self, a: Point, b: Point) {
        self.cells.swap(a.y * self.size + a.x, b.y * self.size + b.x);
    }

    /// Deduplication key: the cell sequence itself
    pub fn content_key(&self) -> &[Cell] {
        &self.cells
    }

    /// Position that the goal piece has to reach: bottom row, middle column
    pub fn target(&self) -> Point {
        Point {
            y: self.size - 1,
            x: self.size / 2,
        }
    }

    /// Current position of the goal piece
    pub fn goal_position(&self) -> Point {
        let index = self
            .cells
            .iter()
            .position(|c| *c == Cell::Goal)
            .unwrap_or_default();
        Point {
            y: index / self.size,
            x: index % self.size,
        }
    }

    pub fn is_goal_reached(&self) -> bool {
        let target = self.target();
        self.get(target.y, target.x) == Cell::Goal
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }
}

/// Renders one quoted row per line, each followed by a comma
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .rows()
            .map(|row| format!("\"{}\",", row.iter().map(|c| c.to_char()).join("")))
            .join("\n");
        writeln!(f, "{}", rendered)
    }
}
