use super::board::Board;
use super::types::{Cell, Mark, WinPattern};

/// Scan order decides which line is reported when several are complete.
pub const WIN_PATTERNS: [WinPattern; 8] = [
    WinPattern::new([6, 7, 8]),
    WinPattern::new([3, 4, 5]),
    WinPattern::new([0, 1, 2]),
    WinPattern::new([0, 3, 6]),
    WinPattern::new([1, 4, 7]),
    WinPattern::new([2, 5, 8]),
    WinPattern::new([0, 4, 8]),
    WinPattern::new([2, 4, 6]),
];

pub fn check_winner(board: &Board, mark: Mark) -> Option<WinPattern> {
    let cells = board.cells();
    WIN_PATTERNS
        .iter()
        .find(|pattern| {
            pattern
                .cells()
                .iter()
                .all(|&index| cells[index] == Cell::Marked(mark))
        })
        .copied()
}

pub fn has_won(board: &Board, mark: Mark) -> bool {
    check_winner(board, mark).is_some()
}
