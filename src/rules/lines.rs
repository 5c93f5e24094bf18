//! Winning-line detection on the torus

use super::board::{Board, Player};

/// Consecutive own pieces needed to win.
pub const WIN_LINE_LENGTH: usize = 3;

/// Line directions checked from every square: east, south, south-east, south-west.
/// The opposite directions are covered by starting from the other end of the line.
const LINE_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Check whether `player` owns a full line anywhere on the board.
pub fn has_line(board: &Board, player: Player) -> bool {
    let cell = player.to_cell();
    board.squares_of(player).any(|start| {
        LINE_DIRECTIONS.iter().any(|&(dr, dc)| {
            (1..WIN_LINE_LENGTH as i32)
                .all(|step| board.get(start.offset(dr * step, dc * step)) == cell)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Square;

    fn board_with(player: Player, squares: &[(usize, usize)]) -> Board {
        let mut board = Board::new();
        for &(r, c) in squares {
            board.set(Square::new(r, c).unwrap(), player.to_cell());
        }
        board
    }

    #[test]
    fn test_detects_straight_and_diagonal_lines() {
        assert!(has_line(&board_with(Player::One, &[(2, 2), (2, 3), (2, 4)]), Player::One));
        assert!(has_line(&board_with(Player::One, &[(1, 5), (2, 5), (3, 5)]), Player::One));
        assert!(has_line(&board_with(Player::Two, &[(0, 0), (1, 1), (2, 2)]), Player::Two));
        assert!(has_line(&board_with(Player::Two, &[(0, 4), (1, 3), (2, 2)]), Player::Two));
    }

    #[test]
    fn test_lines_wrap_around_edges() {
        assert!(has_line(&board_with(Player::One, &[(4, 7), (4, 0), (4, 1)]), Player::One));
        assert!(has_line(&board_with(Player::One, &[(7, 7), (0, 0), (1, 1)]), Player::One));
        assert!(has_line(&board_with(Player::One, &[(7, 0), (0, 7), (1, 6)]), Player::One));
    }

    #[test]
    fn test_gap_or_mixed_owner_is_not_a_line() {
        let mut board = board_with(Player::One, &[(3, 3), (3, 4), (3, 6)]);
        assert!(!has_line(&board, Player::One));
        board.set(Square::new(3, 5).unwrap(), Player::Two.to_cell());
        assert!(!has_line(&board, Player::One));
        assert!(!has_line(&board, Player::Two));
    }
}
