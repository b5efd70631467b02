use crate::games::SessionRng;
use crate::log;
use super::board::{Board, validate_human_move};
use super::bot_controller::select_computer_move;
use super::error::GameError;
use super::types::{FirstPlayer, GameStatus, Mark, Turn, WinPattern};
use super::win_detector::check_winner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub index: usize,
    pub status: GameStatus,
    pub pattern: Option<WinPattern>,
}

/// One human-versus-computer game, owned by the caller.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    player_mark: Mark,
    computer_mark: Mark,
    first_player: FirstPlayer,
    current_turn: Turn,
    status: GameStatus,
    winning_pattern: Option<WinPattern>,
}

impl GameSession {
    /// The computer plays the mark the human did not choose.
    pub fn new(player_mark: Mark, first_player: FirstPlayer) -> Self {
        Self {
            board: Board::new(),
            player_mark,
            computer_mark: player_mark.opponent(),
            first_player,
            current_turn: first_player.into(),
            status: GameStatus::InProgress,
            winning_pattern: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player_mark(&self) -> Mark {
        self.player_mark
    }

    pub fn computer_mark(&self) -> Mark {
        self.computer_mark
    }

    pub fn current_turn(&self) -> Turn {
        self.current_turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winning_pattern(&self) -> Option<WinPattern> {
        self.winning_pattern
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn play_human_move(&mut self, index: usize) -> Result<TurnOutcome, GameError> {
        self.ensure_turn(Turn::Human)?;
        let index = validate_human_move(&self.board, index)?;
        self.place(Turn::Human, index)
    }

    pub fn play_computer_move(&mut self, rng: &mut SessionRng) -> Result<TurnOutcome, GameError> {
        self.ensure_turn(Turn::Computer)?;
        let index = select_computer_move(&self.board, self.computer_mark, self.player_mark, rng)?;
        self.place(Turn::Computer, index)
    }

    /// Starts over with the same marks and opening side.
    pub fn reset(&mut self) {
        *self = Self::new(self.player_mark, self.first_player);
    }

    fn ensure_turn(&self, turn: Turn) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.current_turn != turn {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    fn place(&mut self, turn: Turn, index: usize) -> Result<TurnOutcome, GameError> {
        let mark = self.mark_for(turn);
        self.board.apply_move(mark, index)?;

        self.check_game_over(turn);
        if !self.is_over() {
            self.current_turn = turn.next();
        }

        Ok(TurnOutcome {
            index,
            status: self.status,
            pattern: self.winning_pattern,
        })
    }

    fn mark_for(&self, turn: Turn) -> Mark {
        match turn {
            Turn::Human => self.player_mark,
            Turn::Computer => self.computer_mark,
        }
    }

    fn check_game_over(&mut self, mover: Turn) {
        if let Some(pattern) = check_winner(&self.board, self.mark_for(mover)) {
            self.winning_pattern = Some(pattern);
            self.status = match mover {
                Turn::Human => GameStatus::HumanWon,
                Turn::Computer => GameStatus::ComputerWon,
            };
            log!("{:?} won with {:?}", mover, pattern.cells());
            return;
        }

        if self.board.is_full() {
            self.status = GameStatus::Draw;
            log!("Board full, game drawn");
        }
    }
}
