use engine::games::tictactoe::{Board, GameStatus, WinPattern};

pub const CHOOSE_MARK: &str = "Do you want to be X or O?";
pub const COMPUTER_FIRST: &str = "Computer will go first";
pub const HUMAN_FIRST: &str = "You will go first";
pub const PLAY_AGAIN: &str = "Play Again? (y/n)";

pub fn game_over_message(status: GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::HumanWon => Some("Congratulations you won!"),
        GameStatus::ComputerWon => Some("Sorry, you lost"),
        GameStatus::Draw => Some("Its a tie!"),
        GameStatus::InProgress => None,
    }
}

/// Free cells show their 1-based number; cells on the winning line are
/// bracketed.
pub fn render_board(board: &Board, pattern: Option<WinPattern>) -> String {
    let cells: Vec<String> = board
        .cells()
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let highlighted = pattern.is_some_and(|p| p.contains(index));
            match (cell.mark(), highlighted) {
                (Some(mark), true) => format!("[{}]", mark),
                (Some(mark), false) => format!(" {} ", mark),
                (None, _) => format!(" {} ", index + 1),
            }
        })
        .collect();

    cells
        .chunks(3)
        .map(|row| row.join("|"))
        .collect::<Vec<_>>()
        .join("\n---+---+---\n")
}
