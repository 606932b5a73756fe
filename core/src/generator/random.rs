use std::collections::BTreeSet;

use super::*;

/// Places `mine_count` mines at uniformly random positions outside the safe zone around
/// `first_click`, then derives adjacency counts.
///
/// The input board is left untouched, a mined copy is returned. Fails with
/// [`GameError::TooManyMines`] before drawing anything when the mines cannot fit.
pub fn place_mines_safely<R: Rng + ?Sized>(
    board: &Board,
    mine_count: CellCount,
    first_click: Coord2,
    rng: &mut R,
) -> Result<Board> {
    let first_click = board.validate_coords(first_click)?;
    let grid_size = board.grid_size();
    let zone: BTreeSet<Coord2> = safe_zone(board, first_click).collect();

    let capacity = board
        .iter_coords()
        .filter(|coords| !board[*coords].has_mine && !zone.contains(coords))
        .count();
    let capacity = capacity as CellCount;
    if mine_count > capacity {
        log::warn!(
            "Cannot keep first click safe, requested {} mines but only {} fit",
            mine_count,
            capacity
        );
        return Err(GameError::TooManyMines {
            requested: mine_count,
            capacity,
        });
    }

    let mut mined = board.clone();
    let mut mines_placed = 0;
    while mines_placed < mine_count {
        let coords = (
            rng.random_range(0..grid_size),
            rng.random_range(0..grid_size),
        );
        if !mined[coords].has_mine && !zone.contains(&coords) {
            mined[coords].has_mine = true;
            mines_placed += 1;
        }
    }
    mined.recount_adjacent();

    log::debug!(
        "Placed {} mines on a {}x{} board, safe zone of {} around {:?}",
        mines_placed,
        grid_size,
        grid_size,
        zone.len(),
        first_click
    );
    Ok(mined)
}
