mod board;
mod bot_controller;
mod error;
mod game_state;
mod types;
mod win_detector;

pub use board::{Board, validate_human_move};
pub use bot_controller::{
    CENTER, CORNERS, MoveDecision, MoveReason, SIDES, select_computer_move,
    select_computer_move_with_reason,
};
pub use error::GameError;
pub use game_state::{GameSession, TurnOutcome};
pub use types::{BOARD_SIZE, Cell, FirstPlayer, GameStatus, Mark, Turn, WinPattern};
pub use win_detector::{WIN_PATTERNS, check_winner, has_won};
