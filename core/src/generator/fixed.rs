use super::*;

/// Places mines at exactly `positions` (duplicates collapse) and derives adjacency counts.
pub fn place_fixed_mines(board: &Board, positions: &[Coord2]) -> Result<Board> {
    let mut mined = board.clone();
    for &coords in positions {
        let coords = mined.validate_coords(coords)?;
        mined[coords].has_mine = true;
    }
    mined.recount_adjacent();

    log::debug!("Placed scripted layout with {} mines", mined.mine_total());
    Ok(mined)
}
