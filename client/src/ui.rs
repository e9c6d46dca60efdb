use tictactoe_common::games::tictactoe::{
    BOARD_SIZE, Board, CELL_COUNT, Difficulty, GameStatus, Mark, MoveHint, Opponent,
    TicTacToeGameState,
};

pub const HELP: &str = "Commands: 1-9 play a cell, h hints, r reset, d <easy|medium|hard> difficulty, m switch opponent, q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Zero-based cell index.
    Play(usize),
    Hints,
    Reset,
    SetDifficulty(Difficulty),
    ToggleOpponent,
    Help,
    Quit,
}

/// Cells are numbered 1-9 for the player and converted to 0-8 here.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let mut parts = input.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("Enter a command".to_string());
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "h" | "hint" | "hints" => Command::Hints,
        "r" | "reset" => Command::Reset,
        "m" | "mode" => Command::ToggleOpponent,
        "q" | "quit" | "exit" => Command::Quit,
        "?" | "help" => Command::Help,
        "d" | "difficulty" => {
            let level = parts
                .next()
                .ok_or_else(|| "Usage: d <easy|medium|hard>".to_string())?;
            Command::SetDifficulty(level.parse()?)
        }
        cell => {
            let number: usize = cell
                .parse()
                .map_err(|_| format!("Unknown command '{}'. {}", head, HELP))?;
            if !(1..=CELL_COUNT).contains(&number) {
                return Err(format!("Cell must be between 1 and {}", CELL_COUNT));
            }
            Command::Play(number - 1)
        }
    };

    if parts.next().is_some() {
        return Err(format!("Unexpected arguments after '{}'", head));
    }
    Ok(command)
}

/// Empty cells show their 1-based number so the player knows what to type.
pub fn render_board(board: &Board) -> String {
    let separator = vec!["---"; BOARD_SIZE].join("+");
    let rows: Vec<String> = (0..BOARD_SIZE)
        .map(|row| {
            (0..BOARD_SIZE)
                .map(|col| {
                    let index = row * BOARD_SIZE + col;
                    match board[index] {
                        Mark::Empty => format!(" {} ", index + 1),
                        mark => format!(" {} ", mark.symbol()),
                    }
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();
    rows.join(&format!("\n{}\n", separator))
}

pub fn render_hints(hints: &[MoveHint]) -> String {
    hints
        .iter()
        .map(|hint| format!("{}: {}%", hint.index + 1, hint.win_chance))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn describe_opponent(opponent: Opponent) -> String {
    match opponent {
        Opponent::Human => "human".to_string(),
        Opponent::Computer(difficulty) => format!("computer ({})", difficulty),
    }
}

pub fn status_message(state: &TicTacToeGameState) -> String {
    match state.status {
        GameStatus::InProgress => format!("Next player: {}", state.current_mark.symbol()),
        GameStatus::Draw => "Game is a draw!".to_string(),
        GameStatus::XWon | GameStatus::OWon => {
            let winner = state.winner().map(|mark| mark.symbol()).unwrap_or('?');
            match state.winning_line() {
                Some(line) => format!(
                    "Winner: {} (cells {})",
                    winner,
                    line.cells
                        .iter()
                        .map(|index| (index + 1).to_string())
                        .collect::<Vec<_>>()
                        .join("-")
                ),
                None => format!("Winner: {}", winner),
            }
        }
    }
}
