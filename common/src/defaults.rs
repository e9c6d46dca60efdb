use std::time::Duration;

use crate::games::tictactoe::Difficulty;

pub const DEFAULT_DIFFICULTY: Difficulty = Difficulty::Hard;
pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(500);
pub const MAX_THINKING_DELAY: Duration = Duration::from_secs(5);
