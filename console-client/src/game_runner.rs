use derive_more::{Display, Error, From};
use engine::games::SessionRng;
use engine::games::tictactoe::{GameError, GameSession, GameStatus, Mark, Turn};
use engine::{log, log_debug};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::config::PacingConfig;
use crate::input::{MoveInput, parse_mark, parse_move, parse_yes_no};
use crate::render::{
    CHOOSE_MARK, COMPUTER_FIRST, HUMAN_FIRST, PLAY_AGAIN, game_over_message, render_board,
};

#[derive(Debug, Display, Error, From)]
pub enum RunnerError {
    #[display("I/O error: {_0}")]
    Io(std::io::Error),
    #[display("Game error: {_0}")]
    Game(GameError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub games_played: u32,
    pub human_wins: u32,
    pub computer_wins: u32,
    pub draws: u32,
}

impl SessionSummary {
    fn record(&mut self, status: GameStatus) {
        self.games_played += 1;
        match status {
            GameStatus::HumanWon => self.human_wins += 1,
            GameStatus::ComputerWon => self.computer_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => {}
        }
    }
}

enum GameEnd {
    Finished(GameStatus),
    Quit,
}

/// Drives games on a line-based console. Pacing delays live here, never in
/// the engine.
pub struct GameRunner<R, W> {
    lines: Lines<R>,
    out: W,
    pacing: PacingConfig,
    rng: SessionRng,
}

impl<R, W> GameRunner<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(reader: R, out: W, pacing: PacingConfig, rng: SessionRng) -> Self {
        Self {
            lines: reader.lines(),
            out,
            pacing,
            rng,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Asks until a valid mark is typed; `None` when input ends.
    pub async fn choose_mark(&mut self) -> Result<Option<Mark>, RunnerError> {
        loop {
            let Some(line) = self.prompt(CHOOSE_MARK).await? else {
                return Ok(None);
            };
            if let Some(mark) = parse_mark(&line) {
                return Ok(Some(mark));
            }
            writeln!(self.out, "Please type X or O.")?;
        }
    }

    pub async fn run(&mut self, mut session: GameSession) -> Result<SessionSummary, RunnerError> {
        let mut summary = SessionSummary::default();
        log!(
            "Session started: player {} vs computer {}, seed {}",
            session.player_mark(),
            session.computer_mark(),
            self.rng.seed()
        );

        loop {
            let status = match self.play_game(&mut session).await? {
                GameEnd::Finished(status) => status,
                GameEnd::Quit => break,
            };
            summary.record(status);
            self.show_game_over(&session).await?;

            if !self.ask_play_again().await? {
                break;
            }
            session.reset();
        }

        writeln!(
            self.out,
            "Games: {}, won: {}, lost: {}, tied: {}",
            summary.games_played, summary.human_wins, summary.computer_wins, summary.draws
        )?;
        Ok(summary)
    }

    async fn play_game(&mut self, session: &mut GameSession) -> Result<GameEnd, RunnerError> {
        let opener = match session.current_turn() {
            Turn::Computer => COMPUTER_FIRST,
            Turn::Human => HUMAN_FIRST,
        };
        writeln!(self.out, "{}", opener)?;

        while !session.is_over() {
            match session.current_turn() {
                Turn::Computer => {
                    let delay = if session.board().occupied_count() == 0 {
                        self.pacing.opening_delay_ms
                    } else {
                        self.pacing.reply_delay_ms
                    };
                    pause(delay).await;
                    let outcome = session.play_computer_move(&mut self.rng)?;
                    writeln!(self.out, "Computer takes {}", outcome.index + 1)?;
                }
                Turn::Human => {
                    writeln!(self.out, "{}", render_board(session.board(), None))?;
                    let Some(line) = self.prompt("Your move (1-9, q to quit):").await? else {
                        return Ok(GameEnd::Quit);
                    };
                    match parse_move(&line) {
                        MoveInput::Quit => return Ok(GameEnd::Quit),
                        MoveInput::Invalid => writeln!(self.out, "Type a number from 1 to 9.")?,
                        MoveInput::Cell(index) => {
                            if let Err(err) = session.play_human_move(index) {
                                log_debug!("Rejected human move {}: {}", index, err);
                                writeln!(self.out, "{}", err)?;
                            }
                        }
                    }
                }
            }
        }

        Ok(GameEnd::Finished(session.status()))
    }

    async fn show_game_over(&mut self, session: &GameSession) -> Result<(), RunnerError> {
        let status = session.status();
        writeln!(self.out, "{}", render_board(session.board(), session.winning_pattern()))?;

        let delay = match status {
            GameStatus::Draw => self.pacing.draw_delay_ms,
            _ => self.pacing.win_delay_ms,
        };
        pause(delay).await;

        if let Some(message) = game_over_message(status) {
            writeln!(self.out, "{}", message)?;
        }
        log!("Game over: {:?}", status);
        Ok(())
    }

    async fn ask_play_again(&mut self) -> Result<bool, RunnerError> {
        loop {
            let Some(line) = self.prompt(PLAY_AGAIN).await? else {
                return Ok(false);
            };
            if let Some(answer) = parse_yes_no(&line) {
                return Ok(answer);
            }
        }
    }

    async fn prompt(&mut self, text: &str) -> Result<Option<String>, RunnerError> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(self.lines.next_line().await?)
    }
}

async fn pause(delay_ms: u64) {
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::games::tictactoe::FirstPlayer;

    fn runner(input: &'static str, seed: u64) -> GameRunner<&'static [u8], Vec<u8>> {
        GameRunner::new(
            input.as_bytes(),
            Vec::new(),
            PacingConfig::disabled(),
            SessionRng::new(seed),
        )
    }

    fn output(runner: GameRunner<&'static [u8], Vec<u8>>) -> String {
        String::from_utf8(runner.into_output()).unwrap()
    }

    #[tokio::test]
    async fn test_choose_mark_retries_until_valid() {
        let mut runner = runner("z\no\n", 1);

        let mark = runner.choose_mark().await.unwrap();

        assert_eq!(mark, Some(Mark::O));
        assert!(output(runner).contains("Please type X or O."));
    }

    #[tokio::test]
    async fn test_choose_mark_end_of_input() {
        let mut runner = runner("", 1);

        assert_eq!(runner.choose_mark().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_quit_before_any_game_finishes() {
        let mut runner = runner("q\n", 3);
        let session = GameSession::new(Mark::X, FirstPlayer::Computer);

        let summary = runner.run(session).await.unwrap();

        assert_eq!(summary, SessionSummary::default());
        let text = output(runner);
        assert!(text.contains("Computer will go first"));
        assert!(text.contains("Computer takes"));
    }

    #[tokio::test]
    async fn test_full_game_then_decline_replay() {
        // human tries every cell in order; occupied ones are rejected
        let mut runner = runner("1\n2\n3\n4\n5\n6\n7\n8\n9\nn\n", 12345);
        let session = GameSession::new(Mark::X, FirstPlayer::Human);

        let summary = runner.run(session).await.unwrap();

        assert_eq!(summary.games_played, 1);
        assert_eq!(summary.human_wins + summary.computer_wins + summary.draws, 1);
        let text = output(runner);
        assert!(text.contains("You will go first"));
        assert!(text.contains("Play Again?"));
        assert!(
            text.contains("Congratulations you won!")
                || text.contains("Sorry, you lost")
                || text.contains("Its a tie!")
        );
    }

    #[tokio::test]
    async fn test_replay_starts_a_second_game() {
        let mut runner = runner(
            "1\n2\n3\n4\n5\n6\n7\n8\n9\ny\n1\n2\n3\n4\n5\n6\n7\n8\n9\nn\n",
            7,
        );
        let session = GameSession::new(Mark::O, FirstPlayer::Computer);

        let summary = runner.run(session).await.unwrap();

        assert_eq!(summary.games_played, 2);
        assert_eq!(output(runner).matches("Computer will go first").count(), 2);
    }

    #[tokio::test]
    async fn test_end_of_input_mid_game_stops_cleanly() {
        let mut runner = runner("5\n", 9);
        let session = GameSession::new(Mark::X, FirstPlayer::Human);

        let summary = runner.run(session).await.unwrap();

        assert_eq!(summary.games_played, 0);
    }
}
