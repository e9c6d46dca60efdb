mod config;
mod runner;
mod ui;

use clap::Parser;
use tictactoe_common::config::Validate;
use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::Difficulty;
use tictactoe_common::log;
use tictactoe_common::logger::{self, LogTarget};

use config::{Config, OpponentKind, get_config_manager};
use runner::{GameSettings, run_game};

/// The board and prompts own stdout.
const LOG_TARGET: LogTarget = LogTarget::Stderr;

#[derive(Parser)]
#[command(name = "tictactoe_client")]
struct Args {
    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,
    #[arg(long, value_enum)]
    opponent: Option<OpponentKind>,
    /// Seed for the computer's random moves
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    hints: bool,
    #[arg(long)]
    use_log_prefix: bool,
}

impl Args {
    fn apply_to(&self, config: Config) -> Config {
        Config {
            difficulty: self.difficulty.unwrap_or(config.difficulty),
            opponent: self.opponent.unwrap_or(config.opponent),
            show_hints: self.hints || config.show_hints,
            ..config
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, LOG_TARGET);

    let config = match get_config_manager().get_config() {
        Ok(config) => config,
        Err(e) => {
            log!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };
    let config = args.apply_to(config);
    config.validate()?;

    let rng = args.seed.map_or_else(SessionRng::from_random, SessionRng::new);
    let settings = GameSettings {
        opponent: config.opponent.to_opponent(config.difficulty),
        difficulty: config.difficulty,
        thinking_delay: config.thinking_delay(),
        show_hints: config.show_hints,
    };

    log!(
        "Starting game against {} (seed {})",
        ui::describe_opponent(settings.opponent),
        rng.seed()
    );

    run_game(settings, rng).await?;

    log!("Goodbye");
    Ok(())
}
