use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Where a session's mines come from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LayoutSource {
    /// Uniformly random, keeping the first click and its neighbours clear.
    Random,
    /// Scripted positions, mined when the session is created.
    Fixed(Vec<Coord2>),
}

impl LayoutSource {
    /// Board a session starts from, scripted layouts are mined right away.
    pub fn initial_board(&self, grid_size: Coord) -> Result<Board> {
        let board = Board::new(grid_size);
        match self {
            Self::Random => Ok(board),
            Self::Fixed(positions) => place_fixed_mines(&board, positions),
        }
    }

    /// Mines `board` around `first_click` when the layout waits for it, `None` for
    /// layouts already placed by [`LayoutSource::initial_board`].
    pub fn place_on_first_click<R: Rng + ?Sized>(
        &self,
        board: &Board,
        mine_count: CellCount,
        first_click: Coord2,
        rng: &mut R,
    ) -> Result<Option<Board>> {
        match self {
            Self::Random => place_mines_safely(board, mine_count, first_click, rng).map(Some),
            Self::Fixed(_) => Ok(None),
        }
    }
}

/// The first click plus its in-bounds neighbours.
pub fn safe_zone(board: &Board, center: Coord2) -> impl Iterator<Item = Coord2> + use<> {
    core::iter::once(center).chain(board.iter_neighbors(center))
}
