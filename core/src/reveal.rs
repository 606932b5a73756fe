use crate::*;

/// Tiles opened by a single [`reveal_region`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealReport {
    pub newly_revealed: CellCount,
    pub coords: Vec<Coord2>,
}

/// Opens `start` and flood-fills outward through zero-count tiles.
///
/// Flagged and mined tiles are never opened, numbered tiles are opened but stop the
/// fill. Mines under `start` are left for the caller to handle.
pub fn reveal_region(board: &mut Board, start: Coord2) -> Result<RevealReport> {
    let start = board.validate_coords(start)?;
    let mut report = RevealReport::default();
    let mut to_visit = vec![start];

    while let Some(coords) = to_visit.pop() {
        let tile = board[coords];
        if tile.is_revealed || tile.is_flagged || tile.has_mine {
            continue;
        }

        board[coords].is_revealed = true;
        report.newly_revealed += 1;
        report.coords.push(coords);
        log::trace!("Opened tile at {:?}, mine count: {}", coords, tile.mine_count);

        if tile.mine_count == 0 {
            to_visit.extend(board.iter_neighbors(coords).filter(|&pos| {
                let neighbor = board[pos];
                !neighbor.is_revealed && !neighbor.is_flagged && !neighbor.has_mine
            }));
        }
    }

    Ok(report)
}
