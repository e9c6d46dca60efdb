use std::io::BufRead;
use std::time::Duration;

use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{
    Difficulty, GameStatus, Opponent, TicTacToeGameState, calculate_move_hints,
};
use tictactoe_common::log;
use tokio::sync::mpsc;

use crate::ui::{self, Command};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct GameSettings {
    pub opponent: Opponent,
    pub difficulty: Difficulty,
    pub thinking_delay: Duration,
    pub show_hints: bool,
}

/// Local game plus the display state around it: chosen difficulty, hint toggle and the bot RNG.
pub struct LocalGame {
    state: TicTacToeGameState,
    difficulty: Difficulty,
    show_hints: bool,
    rng: SessionRng,
}

impl LocalGame {
    pub fn new(settings: &GameSettings, rng: SessionRng) -> Self {
        Self {
            state: TicTacToeGameState::new(settings.opponent),
            difficulty: settings.difficulty,
            show_hints: settings.show_hints,
            rng,
        }
    }

    pub fn state(&self) -> &TicTacToeGameState {
        &self.state
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "{}\n{}",
            ui::render_board(&self.state.board),
            ui::status_message(&self.state)
        );
        if self.show_hints
            && self.state.status == GameStatus::InProgress
            && !self.state.is_computer_turn()
            && let Some(hints) = self.hints()
        {
            out.push_str(&format!("\nHints: {}", hints));
        }
        out
    }

    fn hints(&self) -> Option<String> {
        calculate_move_hints(&self.state.board, self.state.current_mark)
            .ok()
            .filter(|hints| !hints.is_empty())
            .map(|hints| ui::render_hints(&hints))
    }

    pub fn apply(&mut self, command: Command) -> Result<Flow, String> {
        match command {
            Command::Play(index) => {
                if self.state.is_computer_turn() {
                    return Err("Wait for the computer to move".to_string());
                }
                let mark = self.state.current_mark;
                self.state.place_mark(index)?;
                log!("{} plays cell {}", mark.symbol(), index + 1);
                self.log_result();
            }
            Command::Hints => {
                self.show_hints = !self.show_hints;
            }
            Command::Reset => {
                self.state.reset();
                log!("Game reset");
            }
            Command::SetDifficulty(difficulty) => {
                self.difficulty = difficulty;
                self.state.set_opponent(Opponent::Computer(difficulty));
                log!("New game against {}", ui::describe_opponent(self.state.opponent));
            }
            Command::ToggleOpponent => {
                let opponent = match self.state.opponent {
                    Opponent::Human => Opponent::Computer(self.difficulty),
                    Opponent::Computer(_) => Opponent::Human,
                };
                self.state.set_opponent(opponent);
                log!("New game against {}", ui::describe_opponent(opponent));
            }
            Command::Help => {}
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Plays the computer's move if it is its turn. Returns the played cell.
    pub fn play_computer_turn(&mut self) -> Result<Option<usize>, String> {
        let Some(index) = self.state.computer_move(&mut self.rng) else {
            return Ok(None);
        };
        self.state.place_mark(index)?;
        log!("Computer ({}) plays cell {}", self.difficulty, index + 1);
        self.log_result();
        Ok(Some(index))
    }

    fn log_result(&self) {
        if self.state.status != GameStatus::InProgress {
            log!("{}", ui::status_message(&self.state));
        }
    }
}

/// Blocking stdin reader on its own thread so quitting never waits for input.
fn read_commands(command_tx: mpsc::UnboundedSender<String>) {
    for line in std::io::stdin().lock().lines() {
        match line {
            Ok(line) => {
                if command_tx.send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                log!("Failed to read input: {}", e);
                break;
            }
        }
    }
}

pub async fn run_game(settings: GameSettings, rng: SessionRng) -> Result<(), String> {
    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || read_commands(command_tx));

    let thinking_delay = settings.thinking_delay;
    let mut game = LocalGame::new(&settings, rng);

    println!("{}", ui::HELP);
    println!("{}", game.render());

    loop {
        if game.state().is_computer_turn() {
            tokio::time::sleep(thinking_delay).await;
            game.play_computer_turn()?;
            println!("{}", game.render());
            continue;
        }

        let Some(line) = command_rx.recv().await else {
            break;
        };

        let command = match ui::parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match game.apply(command) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) if command == Command::Help => println!("{}", ui::HELP),
            Ok(Flow::Continue) => println!("{}", game.render()),
            Err(e) => println!("{}", e),
        }
    }

    Ok(())
}
