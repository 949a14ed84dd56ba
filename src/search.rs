//! Minimum move count by breadth-first search

use std::collections::{HashSet, VecDeque};

use log::{debug, warn};

use crate::grid::Grid;
use crate::moves::Direction;

/// Bounds for a single search run
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchLimits {
    /// Give up once this many distinct grids have been seen
    ///
    /// Checked only when a new grid is about to enter the visited set, so an
    /// [Outcome::Aborted] report has `states_seen` equal to the cap, and a
    /// search that runs out of new grids below the cap ends normally.
    pub max_states: Option<usize>,
}

/// How a search ended
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Outcome {
    /// Goal reached; `path` is one shortest sequence of slides
    Solved { moves: usize, path: Vec<Direction> },
    /// Every reachable grid was explored without reaching the goal
    Unsolvable,
    /// The state cap in [SearchLimits] was hit first
    Aborted,
}

/// Result of [solve]
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct SearchReport {
    pub outcome: Outcome,
    /// Distinct grids entered into the visited set, including the start
    pub states_seen: usize,
}

impl SearchReport {
    /// Minimum move count, if the grid was solved
    pub fn moves(&self) -> Option<usize> {
        match self.outcome {
            Outcome::Solved { moves, .. } => Some(moves),
            Outcome::Unsolvable | Outcome::Aborted => None,
        }
    }

    /// Print report
    pub fn print_report(&self) {
        match self.outcome {
            Outcome::Solved { moves, .. } => println!("Moves to complete: {}", moves),
            Outcome::Unsolvable => println!("Moves to complete: unsolvable"),
            Outcome::Aborted => println!("Moves to complete: unknown (search aborted)"),
        }
        println!("States seen: {}", self.states_seen);
    }
}

/// Parent link of an enqueued grid: index of the grid it came from and the
/// slide that produced it. The start grid has none.
type Link = Option<(usize, Direction)>;

/// Find the minimum number of slides that bring the goal piece to its target.
///
/// Breadth-first over grid configurations with the four slides as edges.
/// Grids are marked visited when enqueued, and the goal is checked when a
/// grid is dequeued, so the first goal grid dequeued has the smallest depth.
///
/// # Examples
/// ```
/// use slide_level::{solve, Grid, SearchLimits};
/// let grid = Grid::parse_rows("\"P  \",\n\"   \",\n\"  S\",").unwrap();
/// let report = solve(&grid, &SearchLimits::default());
/// assert_eq!(report.moves(), Some(2));
/// ```
pub fn solve(start: &Grid, limits: &SearchLimits) -> SearchReport {
    let mut visited: HashSet<Grid> = HashSet::new();
    let mut links: Vec<Link> = vec![None];
    let mut work: VecDeque<(Grid, usize, usize)> = VecDeque::new();

    visited.insert(start.clone());
    work.push_back((start.clone(), 0, 0));

    while let Some((grid, depth, node)) = work.pop_front() {
        if grid.is_goal_reached() {
            let report = SearchReport {
                outcome: Outcome::Solved {
                    moves: depth,
                    path: trace_path(&links, node),
                },
                states_seen: visited.len(),
            };
            debug!(
                "Solved in {} moves, {} states seen",
                depth, report.states_seen
            );
            return report;
        }

        for direction in Direction::ALL {
            let next = grid.slide(direction);
            if visited.contains(&next) {
                continue;
            }
            if limits.max_states.is_some_and(|max| visited.len() >= max) {
                warn!("Search aborted after {} states", visited.len());
                return SearchReport {
                    outcome: Outcome::Aborted,
                    states_seen: visited.len(),
                };
            }
            visited.insert(next.clone());
            links.push(Some((node, direction)));
            work.push_back((next, depth + 1, links.len() - 1));
        }
    }

    debug!("Unsolvable, {} states seen", visited.len());
    SearchReport {
        outcome: Outcome::Unsolvable,
        states_seen: visited.len(),
    }
}

/// Follow parent links from `node` back to the start grid.
fn trace_path(links: &[Link], mut node: usize) -> Vec<Direction> {
    let mut path = Vec::new();
    while let Some((parent, direction)) = links[node] {
        path.push(direction);
        node = parent;
    }
    path.reverse();
    path
}

impl Grid {
    /// Solve without a state cap, see [solve]
    pub fn solve(&self) -> SearchReport {
        solve(self, &SearchLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::testing::{arb_grid, grid};
    use crate::{solve, Direction, Outcome, SearchLimits};

    #[test]
    fn goal_already_on_target_takes_zero_moves() {
        let report = grid("\"   \",\n\" M \",\n\" P \",").solve();
        assert_eq!(
            report.outcome,
            Outcome::Solved {
                moves: 0,
                path: vec![]
            }
        );
        assert_eq!(report.states_seen, 1);
    }

    #[test]
    fn corner_goal_with_stopper_needs_two_moves() {
        let start = grid(
            "
\"P  \",
\"   \",
\"  S\",",
        );
        let report = start.solve();

        assert_eq!(
            report.outcome,
            Outcome::Solved {
                moves: 2,
                path: vec![Direction::Down, Direction::Right]
            }
        );
        // start, down, right, then (2,1) from down and (1,2) from right
        assert_eq!(report.states_seen, 5);
    }

    #[test]
    fn path_replays_to_goal() {
        let start = grid(
            "
\" M  \",
\"S   \",
\"  P \",
\"M  S\",",
        );
        let report = start.solve();
        let Outcome::Solved { moves, path } = report.outcome else {
            panic!("expected a solution");
        };
        assert_eq!(path.len(), moves);

        let end = path.iter().fold(start.clone(), |g, d| g.slide(*d));
        assert!(end.is_goal_reached());
    }

    #[test]
    fn open_odd_board_cannot_center_goal() {
        // Without obstacles the goal only ever rests in a corner
        let report = grid("\"P  \",\n\"   \",\n\"   \",").solve();
        assert_eq!(report.outcome, Outcome::Unsolvable);
        assert_eq!(report.moves(), None);
        assert_eq!(report.states_seen, 4);
    }

    #[test]
    fn boxed_in_goal_is_unsolvable() {
        let report = grid(
            "
\" S \",
\"SPS\",
\" S \",",
        )
        .solve();
        assert_eq!(report.outcome, Outcome::Unsolvable);
        assert_eq!(report.states_seen, 1);
    }

    #[test]
    fn state_cap_aborts_search() {
        let start = grid("\"P  \",\n\"   \",\n\"  S\",");
        let report = solve(
            &start,
            &SearchLimits {
                max_states: Some(2),
            },
        );
        assert_eq!(report.outcome, Outcome::Aborted);
        assert_eq!(report.states_seen, 2);

        let roomy = solve(
            &start,
            &SearchLimits {
                max_states: Some(100),
            },
        );
        assert_eq!(roomy.moves(), Some(2));

        // No new grid ever appears, so the cap is never consulted
        let boxed = grid("\" S \",\n\"SPS\",\n\" S \",");
        let report = solve(
            &boxed,
            &SearchLimits {
                max_states: Some(1),
            },
        );
        assert_eq!(report.outcome, Outcome::Unsolvable);
        assert_eq!(report.states_seen, 1);
    }

    #[test]
    fn repeated_search_is_stable() {
        let start = grid(
            "
\"M S \",
\"  M \",
\"P   \",
\" S M\",",
        );
        let first = start.solve();
        for _ in 0..3 {
            assert_eq!(start.solve(), first);
        }
    }

    proptest! {
        #[test]
        fn search_is_deterministic(start in arb_grid()) {
            let first = start.solve();
            let second = start.solve();
            prop_assert_eq!(first.moves(), second.moves());
            prop_assert_eq!(first.states_seen, second.states_seen);
        }

        #[test]
        fn solved_path_has_move_count_length(start in arb_grid()) {
            if let Outcome::Solved { moves, path } = start.solve().outcome {
                prop_assert_eq!(path.len(), moves);
                let end = path.iter().fold(start.clone(), |g, d| g.slide(*d));
                prop_assert!(end.is_goal_reached());
            }
        }
    }
}
