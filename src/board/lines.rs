//! The eight winning lines of a 3×3 grid.
//!
//! Shared by `SubBoard` (over cell marks) and `UltimateGame` (over sub-board
//! winners), so both levels detect wins with the same routine.

use crate::core::Player;

use super::status::BoardStatus;

/// Row-major indices of every winning line: 3 rows, 3 columns, 2 diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Find a player owning all three cells of some line.
///
/// `None` entries never form a line.
#[must_use]
pub fn line_winner(owners: &[Option<Player>; 9]) -> Option<Player> {
    LINES.iter().find_map(|&[a, b, c]| match owners[a] {
        Some(player) if owners[b] == Some(player) && owners[c] == Some(player) => Some(player),
        _ => None,
    })
}

/// Derive a grid status from cell owners.
///
/// `closed[i]` tells whether position `i` can still change; the grid is a
/// draw once every position is closed and no line exists.
#[must_use]
pub fn evaluate(owners: &[Option<Player>; 9], closed: impl Fn(usize) -> bool) -> BoardStatus {
    if let Some(player) = line_winner(owners) {
        return BoardStatus::WonBy(player);
    }

    if (0..9).all(closed) {
        BoardStatus::Draw
    } else {
        BoardStatus::InProgress
    }
}

/// Count lines in which `player` holds two positions and the third is open.
///
/// `open[i]` tells whether position `i` can still be claimed.
#[must_use]
pub fn open_twos(owners: &[Option<Player>; 9], player: Player, open: impl Fn(usize) -> bool) -> usize {
    LINES
        .iter()
        .filter(|line| {
            let mine = line.iter().filter(|&&i| owners[i] == Some(player)).count();
            let free = line.iter().filter(|&&i| owners[i].is_none() && open(i)).count();
            mine == 2 && free == 1
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(layout: &str) -> [Option<Player>; 9] {
        let mut out = [None; 9];
        for (i, ch) in layout.chars().filter(|c| !c.is_whitespace()).enumerate() {
            out[i] = match ch {
                'X' => Some(Player::X),
                'O' => Some(Player::O),
                _ => None,
            };
        }
        out
    }

    #[test]
    fn test_every_line_detected() {
        for line in LINES {
            let mut owners = [None; 9];
            for i in line {
                owners[i] = Some(Player::O);
            }
            assert_eq!(line_winner(&owners), Some(Player::O), "line {:?}", line);
        }
    }

    #[test]
    fn test_no_winner() {
        assert_eq!(line_winner(&[None; 9]), None);
        assert_eq!(line_winner(&grid("XX. O.. ...")), None);
        assert_eq!(line_winner(&grid("XOX XOO OXX")), None);
    }

    #[test]
    fn test_mixed_line_not_a_win() {
        assert_eq!(line_winner(&grid("XXO ... ...")), None);
    }

    #[test]
    fn test_evaluate_draw_requires_all_closed() {
        let owners = grid("XOX XOO OXX");
        assert_eq!(evaluate(&owners, |_| true), BoardStatus::Draw);

        let owners = grid("XOX XOO OX.");
        assert_eq!(evaluate(&owners, |i| owners[i].is_some()), BoardStatus::InProgress);
    }

    #[test]
    fn test_evaluate_win_beats_full() {
        let owners = grid("XXX OOX OXO");
        assert_eq!(evaluate(&owners, |_| true), BoardStatus::WonBy(Player::X));
    }

    #[test]
    fn test_open_twos() {
        let owners = grid("XX. .X. ...");
        // Top row, main diagonal, and middle column are all one move from done
        assert_eq!(open_twos(&owners, Player::X, |_| true), 3);
        // Nothing open
        assert_eq!(open_twos(&owners, Player::X, |_| false), 0);
        assert_eq!(open_twos(&owners, Player::O, |_| true), 0);
    }
}
