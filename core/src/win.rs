use crate::*;

/// Whether every safe tile of `board` has been revealed.
///
/// Flags, hints and chances play no part, unflagged mines do not block a win.
pub fn is_won(board: &Board, mine_count: CellCount) -> bool {
    let safe_tiles = board.total_tiles().saturating_sub(mine_count);
    board.revealed_safe_count() == safe_tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};

    fn beginner_board() -> Board {
        let mut rng = SmallRng::seed_from_u64(42);
        place_mines_safely(&Board::new(9), 10, (4, 4), &mut rng).unwrap()
    }

    fn reveal_safe_tiles(board: &mut Board, limit: usize) {
        let safe: Vec<_> = board
            .iter_coords()
            .filter(|&coords| !board[coords].has_mine)
            .take(limit)
            .collect();
        for coords in safe {
            board[coords].is_revealed = true;
        }
    }

    #[test]
    fn all_safe_tiles_revealed_wins_without_flags() {
        let mut board = beginner_board();

        reveal_safe_tiles(&mut board, 71);

        assert_eq!(board.revealed_safe_count(), 71);
        assert_eq!(board.flagged_count(), 0);
        assert!(is_won(&board, 10));
    }

    #[test]
    fn one_safe_tile_short_is_not_a_win() {
        let mut board = beginner_board();

        reveal_safe_tiles(&mut board, 70);

        assert!(!is_won(&board, 10));
    }

    #[test]
    fn flags_do_not_matter() {
        let mut board = beginner_board();
        reveal_safe_tiles(&mut board, 71);
        let mines: Vec<_> = board
            .iter_coords()
            .filter(|&coords| board[coords].has_mine)
            .collect();
        board[mines[0]].is_flagged = true;

        assert!(is_won(&board, 10));
    }

    #[test]
    fn revealed_mines_are_not_safe_progress() {
        let mut board = beginner_board();
        reveal_safe_tiles(&mut board, 70);
        for coords in board.iter_coords().collect::<Vec<_>>() {
            if board[coords].has_mine {
                board[coords].is_revealed = true;
                board[coords].is_chance_used_mine = true;
            }
        }

        assert!(!is_won(&board, 10));
    }
}
