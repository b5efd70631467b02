use crate::games::SessionRng;
use crate::log_debug;
use super::board::Board;
use super::error::GameError;
use super::types::Mark;
use super::win_detector::has_won;

pub const CORNERS: [usize; 4] = [0, 2, 6, 8];
pub const CENTER: usize = 4;
pub const SIDES: [usize; 4] = [1, 3, 5, 7];

/// Which priority rule produced the computer's move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveReason {
    Win,
    Block,
    Corner,
    Center,
    Side,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveDecision {
    pub index: usize,
    pub reason: MoveReason,
}

/// Picks the computer's move: win, then block, then a random free corner,
/// then the center, then a random free side.
pub fn select_computer_move(
    board: &Board,
    computer_mark: Mark,
    player_mark: Mark,
    rng: &mut SessionRng,
) -> Result<usize, GameError> {
    select_computer_move_with_reason(board, computer_mark, player_mark, rng)
        .map(|decision| decision.index)
}

pub fn select_computer_move_with_reason(
    board: &Board,
    computer_mark: Mark,
    player_mark: Mark,
    rng: &mut SessionRng,
) -> Result<MoveDecision, GameError> {
    if computer_mark == player_mark {
        return Err(GameError::IdenticalMarks);
    }

    let available_moves = board.free_cells();
    if available_moves.is_empty() {
        return Err(GameError::NoLegalMove);
    }

    let decision = decide(board, computer_mark, player_mark, &available_moves, rng)?;
    log_debug!(
        "Computer ({}) picks cell {} by {:?}",
        computer_mark,
        decision.index,
        decision.reason
    );
    Ok(decision)
}

fn decide(
    board: &Board,
    computer_mark: Mark,
    player_mark: Mark,
    available_moves: &[usize],
    rng: &mut SessionRng,
) -> Result<MoveDecision, GameError> {
    if let Some(index) = find_winning_move(board, computer_mark, available_moves)? {
        return Ok(MoveDecision {
            index,
            reason: MoveReason::Win,
        });
    }

    if let Some(index) = find_winning_move(board, player_mark, available_moves)? {
        return Ok(MoveDecision {
            index,
            reason: MoveReason::Block,
        });
    }

    if let Some(index) = choose_free(board, &CORNERS, rng)? {
        return Ok(MoveDecision {
            index,
            reason: MoveReason::Corner,
        });
    }

    if board.is_cell_free(CENTER)? {
        return Ok(MoveDecision {
            index: CENTER,
            reason: MoveReason::Center,
        });
    }

    choose_free(board, &SIDES, rng)?
        .map(|index| MoveDecision {
            index,
            reason: MoveReason::Side,
        })
        .ok_or(GameError::NoLegalMove)
}

fn find_winning_move(
    board: &Board,
    mark: Mark,
    moves: &[usize],
) -> Result<Option<usize>, GameError> {
    for &index in moves {
        let mut copy = board.snapshot();
        copy.apply_move(mark, index)?;
        if has_won(&copy, mark) {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

fn choose_free(
    board: &Board,
    candidates: &[usize],
    rng: &mut SessionRng,
) -> Result<Option<usize>, GameError> {
    let mut free = Vec::with_capacity(candidates.len());
    for &index in candidates {
        if board.is_cell_free(index)? {
            free.push(index);
        }
    }
    Ok(rng.choose(&free).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    fn pick(text: &str, computer: Mark, seed: u64) -> MoveDecision {
        let mut rng = SessionRng::new(seed);
        select_computer_move_with_reason(&board(text), computer, computer.opponent(), &mut rng)
            .unwrap()
    }

    #[test]
    fn test_empty_board_takes_a_corner() {
        let mut rng = SessionRng::new(12345);
        for _ in 0..50 {
            let index = select_computer_move(&Board::new(), Mark::O, Mark::X, &mut rng).unwrap();
            assert!(CORNERS.contains(&index));
        }
    }

    #[test]
    fn test_takes_immediate_win() {
        let decision = pick("OO./XX./X..", Mark::O, 1);

        assert_eq!(decision.index, 2);
        assert_eq!(decision.reason, MoveReason::Win);
    }

    #[test]
    fn test_win_beats_block() {
        // both sides threaten; own win comes first
        let decision = pick("XX./OO./...", Mark::O, 1);

        assert_eq!(decision.index, 5);
        assert_eq!(decision.reason, MoveReason::Win);
    }

    #[test]
    fn test_blocks_opponent_line() {
        let decision = pick("X../.X./O..", Mark::O, 1);

        assert_eq!(decision.index, 8);
        assert_eq!(decision.reason, MoveReason::Block);
    }

    #[test]
    fn test_lowest_winning_index_is_chosen() {
        // X can finish at 2 (top row) and at 6 (left column)
        let decision = pick("XX./X../.OO", Mark::X, 3);

        assert_eq!(decision.index, 2);
        assert_eq!(decision.reason, MoveReason::Win);
    }

    #[test]
    fn test_center_when_corners_taken() {
        let decision = pick("XOX/.../OXO", Mark::O, 9);

        assert_eq!(decision.index, CENTER);
        assert_eq!(decision.reason, MoveReason::Center);
    }

    #[test]
    fn test_block_scans_in_ascending_order() {
        // O can finish at 5 (right column) and at 7 (bottom row)
        let decision = pick("X.O/.X./O.O", Mark::X, 4);

        assert_eq!(decision.index, 5);
        assert_eq!(decision.reason, MoveReason::Block);
    }

    #[test]
    fn test_side_fallback_without_threats() {
        let b = board("XOX/.O./OXO");
        let mut rng = SessionRng::new(2024);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            let decision =
                select_computer_move_with_reason(&b, Mark::X, Mark::O, &mut rng).unwrap();
            assert_eq!(decision.reason, MoveReason::Side);
            seen.insert(decision.index);
        }

        assert_eq!(seen, HashSet::from([3, 5]));
    }

    #[test]
    fn test_single_free_corner_is_always_chosen() {
        let b = board("XOX/.O./OX.");

        for seed in 0..50 {
            let mut rng = SessionRng::new(seed);
            let decision =
                select_computer_move_with_reason(&b, Mark::X, Mark::O, &mut rng).unwrap();
            assert_eq!(decision.index, 8);
            assert_eq!(decision.reason, MoveReason::Corner);
        }
    }

    #[test]
    fn test_every_corner_is_reachable() {
        let mut rng = SessionRng::new(777);
        let mut seen = HashSet::new();

        for _ in 0..400 {
            seen.insert(select_computer_move(&Board::new(), Mark::X, Mark::O, &mut rng).unwrap());
        }

        assert_eq!(seen, HashSet::from(CORNERS));
    }

    #[test]
    fn test_out_of_range_candidate_is_an_error() {
        let mut rng = SessionRng::new(1);

        let result = choose_free(&Board::new(), &[0, 9, 42], &mut rng);

        assert_eq!(result, Err(GameError::InvalidIndex { index: 9 }));
    }

    #[test]
    fn test_choose_free_skips_occupied_candidates() {
        let mut rng = SessionRng::new(5);
        let b = board("X.X/.../X..");

        for _ in 0..20 {
            assert_eq!(choose_free(&b, &CORNERS, &mut rng), Ok(Some(8)));
        }
    }

    #[test]
    fn test_full_board_has_no_legal_move() {
        let mut rng = SessionRng::new(1);

        let result = select_computer_move(&board("XOX/OXO/OXO"), Mark::O, Mark::X, &mut rng);

        assert_eq!(result, Err(GameError::NoLegalMove));
    }

    #[test]
    fn test_identical_marks_rejected() {
        let mut rng = SessionRng::new(1);

        let result = select_computer_move(&Board::new(), Mark::X, Mark::X, &mut rng);

        assert_eq!(result, Err(GameError::IdenticalMarks));
    }

    #[test]
    fn test_selector_never_returns_occupied_cell() {
        let mut rng = SessionRng::new(31337);

        for _ in 0..200 {
            let mut b = Board::new();
            let mut mark = Mark::X;
            while !b.is_full() && !has_won(&b, Mark::X) && !has_won(&b, Mark::O) {
                let index = select_computer_move(&b, mark, mark.opponent(), &mut rng).unwrap();
                assert_eq!(b.is_cell_free(index), Ok(true));
                b.apply_move(mark, index).unwrap();
                mark = mark.opponent();
            }
        }
    }

    #[test]
    fn test_input_board_is_not_modified() {
        let b = board("OO./XX./X..");
        let before = b;
        let mut rng = SessionRng::new(8);

        select_computer_move(&b, Mark::X, Mark::O, &mut rng).unwrap();

        assert_eq!(b, before);
    }
}
