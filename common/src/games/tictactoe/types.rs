use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    fn from_symbol(symbol: char) -> Option<Mark> {
        match symbol {
            'X' | 'x' => Some(Mark::X),
            'O' | 'o' => Some(Mark::O),
            '.' | '_' | '-' => Some(Mark::Empty),
            _ => None,
        }
    }
}

/// 3x3 grid stored row-major: `index = row * 3 + col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
        }
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for Board {
    type Output = Mark;

    fn index(&self, index: usize) -> &Mark {
        &self.cells[index]
    }
}

impl IndexMut<usize> for Board {
    fn index_mut(&mut self, index: usize) -> &mut Mark {
        &mut self.cells[index]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(BOARD_SIZE).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Mark::Empty; CELL_COUNT];
        let mut count = 0;

        for symbol in s.chars() {
            if symbol.is_whitespace() || symbol == '|' || symbol == '/' {
                continue;
            }
            let mark = Mark::from_symbol(symbol)
                .ok_or_else(|| format!("Invalid cell character '{}'", symbol))?;
            if count >= CELL_COUNT {
                return Err(format!("Board must have exactly {} cells", CELL_COUNT));
            }
            cells[count] = mark;
            count += 1;
        }

        if count != CELL_COUNT {
            return Err(format!(
                "Board must have exactly {} cells, got {}",
                CELL_COUNT, count
            ));
        }

        Ok(Self { cells })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    XWon,
    OWon,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub cells: [usize; BOARD_SIZE],
}

impl WinningLine {
    pub fn new(mark: Mark, cells: [usize; BOARD_SIZE]) -> Self {
        Self { mark, cells }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Plies the search looks ahead before scoring a position as neutral.
    pub fn search_depth(&self) -> usize {
        match self {
            Difficulty::Easy | Difficulty::Hard => 8,
            Difficulty::Medium => 2,
        }
    }

    /// Chance of skipping the search and playing a random legal move.
    pub fn random_move_probability(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Medium | Difficulty::Hard => 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown difficulty '{}', expected easy, medium or hard", s))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opponent {
    Human,
    Computer(Difficulty),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_parse_accepts_separators() {
        let board: Board = "XX. | OO. | ...".parse().unwrap();
        assert_eq!(board[0], Mark::X);
        assert_eq!(board[1], Mark::X);
        assert_eq!(board[3], Mark::O);
        assert_eq!(board[4], Mark::O);
        assert_eq!(board.count(Mark::Empty), 5);
    }

    #[test]
    fn test_board_parse_rejects_wrong_length() {
        assert!("XO.".parse::<Board>().is_err());
        assert!("XO.XO.XO.X".parse::<Board>().is_err());
    }

    #[test]
    fn test_board_parse_rejects_unknown_character() {
        let err = "XO.XO.XOZ".parse::<Board>().unwrap_err();
        assert!(err.contains('Z'));
    }

    #[test]
    fn test_board_display_round_trips_through_parse() {
        let board: Board = "x_o/_x_/o_x".parse().unwrap();
        assert_eq!(board.to_string(), "X.O\n.X.\nO.X");
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_difficulty_parse_is_case_insensitive() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_search_depths() {
        assert_eq!(Difficulty::Easy.search_depth(), 8);
        assert_eq!(Difficulty::Medium.search_depth(), 2);
        assert_eq!(Difficulty::Hard.search_depth(), 8);
    }

    #[test]
    fn test_mark_opponent() {
        assert_eq!(Mark::X.opponent(), Some(Mark::O));
        assert_eq!(Mark::O.opponent(), Some(Mark::X));
        assert_eq!(Mark::Empty.opponent(), None);
    }
}
