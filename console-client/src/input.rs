use engine::games::tictactoe::{BOARD_SIZE, Mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveInput {
    Cell(usize),
    Quit,
    Invalid,
}

/// Cells are typed 1-9 and returned as board indices 0-8.
pub fn parse_move(line: &str) -> MoveInput {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return MoveInput::Quit;
    }
    match line.parse::<usize>() {
        Ok(number) if (1..=BOARD_SIZE).contains(&number) => MoveInput::Cell(number - 1),
        _ => MoveInput::Invalid,
    }
}

pub fn parse_mark(line: &str) -> Option<Mark> {
    match line.trim().to_ascii_uppercase().as_str() {
        "X" => Some(Mark::X),
        "O" => Some(Mark::O),
        _ => None,
    }
}

pub fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
