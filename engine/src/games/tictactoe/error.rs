use derive_more::{Display, Error};

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    #[display("Cell index {index} is outside the board (0-8)")]
    InvalidIndex { index: usize },
    #[display("Cell {index} is already marked")]
    IllegalMove { index: usize },
    #[display("No legal move left on the board")]
    NoLegalMove,
    #[display("Computer and player must use different marks")]
    IdenticalMarks,
    #[display("Game is already over")]
    GameOver,
    #[display("Not your turn")]
    NotYourTurn,
    #[display("Malformed board: {reason}")]
    MalformedBoard { reason: String },
}
