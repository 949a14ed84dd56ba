//! Level generation

use anyhow::bail;
use log::{info, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::grid::{Cell, Grid};
use crate::moves::Direction;
use crate::search::{solve, SearchLimits, SearchReport};

/// Acceptance rules for generated levels
#[derive(Clone, Copy, Debug)]
pub struct Requirements {
    /// Board side length
    pub size: usize,
    /// Smallest acceptable solution length
    pub min_moves: usize,
    /// Give up after this many candidates
    pub max_attempts: usize,
    /// Bounds for each candidate's search
    pub limits: SearchLimits,
}

impl Requirements {
    pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

    pub fn new(size: usize, min_moves: usize) -> Self {
        Self {
            size,
            min_moves,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            limits: SearchLimits::default(),
        }
    }
}

/// One candidate considered by [LevelGenerator::generate_level]
#[derive(Debug)]
pub struct Attempt<'a> {
    /// 1-based attempt counter
    pub number: usize,
    pub grid: &'a Grid,
    pub report: &'a SearchReport,
    pub accepted: bool,
}

/// Accepted level
#[derive(Debug)]
pub struct GeneratedLevel {
    pub grid: Grid,
    pub report: SearchReport,
    /// Number of candidates generated, including the accepted one
    pub attempts: usize,
}

/// Random level generator.
pub struct LevelGenerator {
    random: StdRng,
}

impl LevelGenerator {
    /// Length of the random slide walk applied to a fresh board
    const SCRAMBLE_MOVES: usize = 50;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate candidates until one needs at least `min_moves` slides.
    ///
    /// `on_attempt` sees every candidate, rejected ones included.
    /// Unsolvable and aborted candidates are always rejected.
    ///
    /// Returns error if no candidate qualifies within `max_attempts`.
    pub fn generate_level<F>(
        &mut self,
        requirements: &Requirements,
        mut on_attempt: F,
    ) -> anyhow::Result<GeneratedLevel>
    where
        F: FnMut(&Attempt),
    {
        for number in 1..=requirements.max_attempts {
            let grid = self.generate_candidate(requirements.size)?;
            let report = solve(&grid, &requirements.limits);
            let accepted = report
                .moves()
                .is_some_and(|moves| moves >= requirements.min_moves);

            on_attempt(&Attempt {
                number,
                grid: &grid,
                report: &report,
                accepted,
            });

            if accepted {
                info!(
                    "Accepted level after {} attempts ({} states seen)",
                    number, report.states_seen
                );
                return Ok(GeneratedLevel {
                    grid,
                    report,
                    attempts: number,
                });
            }
            trace!("Attempt {} rejected: {:?}", number, report.moves());
        }
        bail!(
            "No {}x{} level needing at least {} moves found in {} attempts",
            requirements.size,
            requirements.size,
            requirements.min_moves,
            requirements.max_attempts
        )
    }

    /// Populate a board and scramble it
    pub fn generate_candidate(&mut self, size: usize) -> anyhow::Result<Grid> {
        let mut grid = self.populate(size)?;
        self.scramble(&mut grid);
        Ok(grid)
    }

    /// Place the goal piece on its target, then scatter obstacles.
    ///
    /// Stationary and movable counts are each drawn below half the cell
    /// count, and every obstacle lands on a random empty cell.
    pub fn populate(&mut self, size: usize) -> anyhow::Result<Grid> {
        if size == 0 {
            bail!("Board size must be at least 1");
        }
        let Some(cell_count) = size.checked_mul(size) else {
            bail!("Board size {} is too large", size);
        };
        let mut cells = vec![Cell::Empty; cell_count];
        cells[(size - 1) * size + size / 2] = Cell::Goal;

        let max_blocks = cell_count / 2;
        let stationary = self.random.gen_range(0..max_blocks.max(1));
        let movable = self.random.gen_range(0..max_blocks.max(1));
        for kind in [(Cell::Stationary, stationary), (Cell::Movable, movable)]
            .into_iter()
            .flat_map(|(kind, count)| std::iter::repeat(kind).take(count))
        {
            let index = loop {
                let index = self.random.gen_range(0..cells.len());
                if cells[index] == Cell::Empty {
                    break index;
                }
            };
            cells[index] = kind;
        }
        Grid::new(size, cells)
    }

    /// Random walk of slides, alternating vertical and horizontal axes,
    /// starting with a vertical one.
    pub fn scramble(&mut self, grid: &mut Grid) {
        let mut vertical = true;
        for _ in 0..Self::SCRAMBLE_MOVES {
            let direction = match (vertical, self.random.gen_bool(0.5)) {
                (true, true) => Direction::Up,
                (true, false) => Direction::Down,
                (false, true) => Direction::Left,
                (false, false) => Direction::Right,
            };
            grid.slide_in_place(direction);
            vertical = !direction.is_vertical();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::level_generator::{LevelGenerator, Requirements};
    use crate::{Cell, Grid, Point};

    fn count(grid: &Grid, kind: Cell) -> usize {
        grid.content_key().iter().filter(|c| **c == kind).count()
    }

    #[test]
    fn populate_starts_solved() {
        let mut gen = LevelGenerator::new(Some(0));
        for size in 1..8 {
            let grid = gen.populate(size).unwrap();
            assert_eq!(grid.size(), size);
            assert!(grid.is_goal_reached());
            assert_eq!(count(&grid, Cell::Goal), 1);
            assert!(count(&grid, Cell::Stationary) < (size * size / 2).max(1));
            assert!(count(&grid, Cell::Movable) < (size * size / 2).max(1));
        }
    }

    #[test]
    fn populate_rejects_empty_board() {
        let mut gen = LevelGenerator::new(Some(0));
        assert!(gen.populate(0).is_err());

        let err = gen.populate(usize::MAX).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn scramble_keeps_stationary_cells() {
        let mut gen = LevelGenerator::new(Some(7));
        let mut grid = gen.populate(6).unwrap();
        let before = grid.clone();
        gen.scramble(&mut grid);

        assert_eq!(count(&grid, Cell::Goal), 1);
        assert_eq!(count(&grid, Cell::Movable), count(&before, Cell::Movable));
        for y in 0..6 {
            for x in 0..6 {
                if before.get(y, x) == Cell::Stationary {
                    assert_eq!(grid.get(y, x), Cell::Stationary);
                }
            }
        }
    }

    #[test]
    fn same_seed_same_levels() {
        let mut a = LevelGenerator::new(Some(42));
        let mut b = LevelGenerator::new(Some(42));
        for _ in 0..5 {
            assert_eq!(
                a.generate_candidate(5).unwrap(),
                b.generate_candidate(5).unwrap()
            );
        }
    }

    #[test]
    fn accepted_level_meets_threshold() {
        let mut gen = LevelGenerator::new(Some(3));
        let mut seen = 0;
        let level = gen
            .generate_level(&Requirements::new(4, 2), |attempt| {
                seen += 1;
                assert_eq!(attempt.number, seen);
            })
            .unwrap();

        assert_eq!(level.attempts, seen);
        assert!(level.report.moves().unwrap() >= 2);
        assert_eq!(level.grid.solve(), level.report);
    }

    #[test]
    fn attempt_cap_gives_error() {
        let mut gen = LevelGenerator::new(Some(1));
        let requirements = Requirements {
            max_attempts: 5,
            ..Requirements::new(1, 1)
        };
        let mut rejected = 0;
        let err = gen
            .generate_level(&requirements, |attempt| {
                assert!(!attempt.accepted);
                rejected += 1;
            })
            .unwrap_err();

        assert_eq!(rejected, 5);
        assert!(err.to_string().contains("5 attempts"));
    }

    #[test]
    fn single_cell_level_is_trivial() {
        let mut gen = LevelGenerator::new(None);
        let grid = gen.generate_candidate(1).unwrap();
        assert_eq!(grid.goal_position(), Point { y: 0, x: 0 });
        assert_eq!(grid.solve().moves(), Some(0));
    }
}
