use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of tiles, mines are placed later by a [`LayoutSource`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: Array2<Tile>,
}

impl Board {
    pub fn new(grid_size: Coord) -> Self {
        let side = usize::from(grid_size);
        let tiles = Array2::from_shape_fn((side, side), |(row, col)| {
            Tile::at((row as Coord, col as Coord))
        });
        Self { tiles }
    }

    pub fn grid_size(&self) -> Coord {
        self.tiles.nrows() as Coord
    }

    pub fn total_tiles(&self) -> CellCount {
        mult(self.grid_size(), self.grid_size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.grid_size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn tile(&self, coords: Coord2) -> Option<&Tile> {
        self.tiles.get(coords.to_nd_index())
    }

    /// Every coordinate in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let size = self.grid_size();
        (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.grid_size())
    }

    pub fn iter_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn mine_total(&self) -> CellCount {
        self.count_where(|tile| tile.has_mine)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_where(|tile| tile.is_flagged)
    }

    pub fn chance_used_count(&self) -> CellCount {
        self.count_where(|tile| tile.is_chance_used_mine)
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.count_where(Tile::is_revealed_safe)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let count = self
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].has_mine)
            .count();
        count as u8
    }

    /// Recomputes the adjacency count of every non-mine tile from the current mine layout.
    pub fn recount_adjacent(&mut self) {
        for coords in self.iter_coords() {
            if !self[coords].has_mine {
                let count = self.adjacent_mine_count(coords);
                self[coords].mine_count = count;
            }
        }
    }

    /// Reveals every mine that is neither flagged nor already revealed.
    pub(crate) fn expose_mines(&mut self) -> CellCount {
        let mut exposed = 0;
        for tile in self.tiles.iter_mut() {
            if tile.has_mine && !tile.is_flagged && !tile.is_revealed {
                tile.is_revealed = true;
                exposed += 1;
            }
        }
        exposed
    }

    pub(crate) fn clear_hints(&mut self) {
        for tile in self.tiles.iter_mut() {
            tile.is_hinted_mine = false;
        }
    }

    fn count_where(&self, predicate: impl Fn(&Tile) -> bool) -> CellCount {
        let count = self.tiles.iter().filter(|&tile| predicate(tile)).count();
        count as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.tiles[coords.to_nd_index()]
    }
}
