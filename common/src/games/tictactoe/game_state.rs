use crate::games::SessionRng;
use super::board::{get_available_moves, is_board_full};
use super::bot_controller::{BOT_MARK, calculate_move};
use super::types::{Board, CELL_COUNT, GameStatus, Mark, Opponent, WinningLine};
use super::win_detector::{check_win, check_win_with_line};

/// One game on one board. X always moves first; against the computer the human is X.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub last_move: Option<usize>,
    pub opponent: Opponent,
}

impl TicTacToeGameState {
    pub fn new(opponent: Opponent) -> Self {
        Self {
            board: Board::new(),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            last_move: None,
            opponent,
        }
    }

    pub fn place_mark(&mut self, index: usize) -> Result<(), String> {
        if self.status != GameStatus::InProgress {
            return Err("Game is already over".to_string());
        }

        if index >= CELL_COUNT {
            return Err("Position out of bounds".to_string());
        }

        if self.board[index] != Mark::Empty {
            return Err("Cell is already marked".to_string());
        }

        self.board[index] = self.current_mark;
        self.last_move = Some(index);

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(())
    }

    pub fn is_computer_turn(&self) -> bool {
        matches!(self.opponent, Opponent::Computer(_))
            && self.status == GameStatus::InProgress
            && self.current_mark == BOT_MARK
    }

    /// The computer's choice for the current board, or `None` outside its turn.
    pub fn computer_move(&self, rng: &mut SessionRng) -> Option<usize> {
        if !self.is_computer_turn() {
            return None;
        }
        match self.opponent {
            Opponent::Computer(difficulty) => calculate_move(&self.board, difficulty, rng),
            Opponent::Human => None,
        }
    }

    pub fn available_moves(&self) -> Vec<usize> {
        get_available_moves(&self.board)
    }

    fn switch_turn(&mut self) {
        if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }
    }

    fn check_game_over(&mut self) {
        if let Some(winner_mark) = check_win(&self.board) {
            self.status = match winner_mark {
                Mark::X => GameStatus::XWon,
                Mark::O => GameStatus::OWon,
                Mark::Empty => unreachable!(),
            };
            return;
        }

        if is_board_full(&self.board) {
            self.status = GameStatus::Draw;
        }
    }

    pub fn winner(&self) -> Option<Mark> {
        match self.status {
            GameStatus::XWon => Some(Mark::X),
            GameStatus::OWon => Some(Mark::O),
            _ => None,
        }
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(&self.board)
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.opponent);
    }

    pub fn set_opponent(&mut self, opponent: Opponent) {
        *self = Self::new(opponent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Difficulty;

    fn play(state: &mut TicTacToeGameState, moves: &[usize]) {
        for &index in moves {
            state.place_mark(index).unwrap();
        }
    }

    #[test]
    fn test_new_game_starts_with_x() {
        let state = TicTacToeGameState::new(Opponent::Human);
        assert_eq!(state.current_mark, Mark::X);
        assert_eq!(state.status, GameStatus::InProgress);
        assert_eq!(state.available_moves().len(), 9);
    }

    #[test]
    fn test_place_mark_alternates_turns() {
        let mut state = TicTacToeGameState::new(Opponent::Human);
        play(&mut state, &[4, 0]);
        assert_eq!(state.board[4], Mark::X);
        assert_eq!(state.board[0], Mark::O);
        assert_eq!(state.current_mark, Mark::X);
        assert_eq!(state.last_move, Some(0));
    }

    #[test]
    fn test_place_mark_rejects_taken_and_out_of_bounds_cells() {
        let mut state = TicTacToeGameState::new(Opponent::Human);
        state.place_mark(4).unwrap();
        assert!(state.place_mark(4).is_err());
        assert!(state.place_mark(9).is_err());
        assert_eq!(state.current_mark, Mark::O);
    }

    #[test]
    fn test_win_ends_game_and_reports_line() {
        let mut state = TicTacToeGameState::new(Opponent::Human);
        play(&mut state, &[0, 3, 1, 4, 2]);
        assert_eq!(state.status, GameStatus::XWon);
        assert_eq!(state.winner(), Some(Mark::X));
        assert_eq!(state.winning_line().map(|line| line.cells), Some([0, 1, 2]));
        assert!(state.place_mark(8).is_err());
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let mut state = TicTacToeGameState::new(Opponent::Human);
        play(&mut state, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(state.status, GameStatus::Draw);
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_computer_turn_only_for_o_against_computer() {
        let mut human = TicTacToeGameState::new(Opponent::Human);
        human.place_mark(0).unwrap();
        assert!(!human.is_computer_turn());
        assert_eq!(human.computer_move(&mut SessionRng::new(0)), None);

        let mut computer = TicTacToeGameState::new(Opponent::Computer(Difficulty::Hard));
        assert!(!computer.is_computer_turn());
        computer.place_mark(0).unwrap();
        assert!(computer.is_computer_turn());
        assert_eq!(computer.computer_move(&mut SessionRng::new(0)), Some(4));
    }

    #[test]
    fn test_reset_keeps_opponent() {
        let opponent = Opponent::Computer(Difficulty::Medium);
        let mut state = TicTacToeGameState::new(opponent);
        play(&mut state, &[0, 4]);
        state.reset();
        assert_eq!(state.board, Board::new());
        assert_eq!(state.current_mark, Mark::X);
        assert_eq!(state.opponent, opponent);

        state.set_opponent(Opponent::Human);
        assert_eq!(state.opponent, Opponent::Human);
    }
}
