mod board;
mod bot_controller;
mod game_state;
mod move_hints;
mod types;
mod win_detector;

pub use board::{get_available_moves, is_board_full};
pub use bot_controller::{
    BOT_MARK, HUMAN_MARK, SearchResult, calculate_minimax_move, calculate_move, minimax,
};
pub use game_state::TicTacToeGameState;
pub use move_hints::{MoveHint, calculate_move_hints};
pub use types::{
    BOARD_SIZE, Board, CELL_COUNT, Difficulty, GameStatus, Mark, Opponent, WinningLine,
};
pub use win_detector::{LINES, Outcome, check_win, check_win_with_line, classify};
