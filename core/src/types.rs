/// Single coordinate axis, used for the grid size and for row or column positions.
pub type Coord = u8;

/// Count type used for mine counts and tile counts.
pub type CellCount = u16;

/// Board position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Largest safe zone a first click can produce on a square board of `grid_size`.
pub const fn max_safe_zone(grid_size: Coord) -> CellCount {
    let side = if grid_size < 3 { grid_size } else { 3 };
    mult(side, side)
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it stays on a board of side `bound`.
fn apply_delta(coords: Coord2, delta: (i8, i8), bound: Coord) -> Option<Coord2> {
    let row = coords.0.checked_add_signed(delta.0)?;
    let col = coords.1.checked_add_signed(delta.1)?;
    (row < bound && col < bound).then_some((row, col))
}

/// In-bounds 8-neighbourhood of a tile, the tile itself excluded.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bound: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bound: Coord) -> Self {
        Self {
            center,
            bound,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, *delta, self.bound) {
                return Some(next_item);
            }
        }
    }
}
