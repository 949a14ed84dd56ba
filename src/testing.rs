//! Fixtures shared by the unit tests.

use proptest::prelude::*;

use crate::{Cell, Grid};

/// Parse a grid fixture written in rendered row form.
pub(crate) fn grid(text: &str) -> Grid {
    Grid::parse_rows(text.trim()).unwrap()
}

/// Random boards up to 5x5 with exactly one goal piece.
pub(crate) fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..6)
        .prop_flat_map(|size| {
            let cell = prop_oneof![
                3 => Just(Cell::Empty),
                1 => Just(Cell::Stationary),
                1 => Just(Cell::Movable),
            ];
            (
                Just(size),
                proptest::collection::vec(cell, size * size),
                0..size * size,
            )
        })
        .prop_map(|(size, mut cells, goal)| {
            cells[goal] = Cell::Goal;
            Grid::new(size, cells).unwrap()
        })
}
