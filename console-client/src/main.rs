mod config;
mod game_runner;
mod input;
mod render;

use clap::{Parser, ValueEnum};
use engine::games::SessionRng;
use engine::games::tictactoe::{FirstPlayer, GameSession, Mark};
use engine::{log, logger};
use std::path::PathBuf;
use tokio::io::BufReader;

use config::{ConsoleConfig, PacingConfig, get_config_manager};
use game_runner::GameRunner;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MarkArg {
    X,
    O,
}

impl From<MarkArg> for Mark {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Mark::X,
            MarkArg::O => Mark::O,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FirstArg {
    Computer,
    Human,
}

impl From<FirstArg> for FirstPlayer {
    fn from(arg: FirstArg) -> Self {
        match arg {
            FirstArg::Computer => FirstPlayer::Computer,
            FirstArg::Human => FirstPlayer::Human,
        }
    }
}

#[derive(Parser)]
#[command(name = "tictactoe_console", about = "Play tic-tac-toe against the computer")]
struct Args {
    /// Mark you play with; asked interactively when neither this nor the config sets it
    #[arg(long, value_enum, ignore_case = true)]
    mark: Option<MarkArg>,
    #[arg(long, value_enum)]
    first: Option<FirstArg>,
    /// Seed for the computer's random tie-breaks
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    no_delay: bool,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    use_log_prefix: bool,
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Console".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_manager = get_config_manager(args.config.as_deref());
    let config = config_manager.get_config()?;

    let pacing = if args.no_delay {
        PacingConfig::disabled()
    } else {
        config.pacing
    };
    let rng = match args.seed.or(config.seed) {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };

    let mut runner = GameRunner::new(
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        pacing,
        rng,
    );

    let player_mark = match args.mark.map(Mark::from).or(config.player_mark) {
        Some(mark) => mark,
        None => {
            let Some(mark) = runner.choose_mark().await? else {
                return Ok(());
            };
            remember_mark(&config_manager, &config, mark);
            mark
        }
    };
    let first_player = args.first.map(FirstPlayer::from).unwrap_or(config.first_player);

    runner.run(GameSession::new(player_mark, first_player)).await?;
    Ok(())
}

fn remember_mark(manager: &config::ConsoleConfigManager, config: &ConsoleConfig, mark: Mark) {
    let updated = ConsoleConfig {
        player_mark: Some(mark),
        ..config.clone()
    };
    if let Err(e) = manager.set_config(&updated) {
        log!("Failed to save config: {}", e);
    }
}
