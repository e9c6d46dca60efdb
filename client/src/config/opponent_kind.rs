use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tictactoe_common::games::tictactoe::{Difficulty, Opponent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    Computer,
    Human,
}

impl OpponentKind {
    pub fn to_opponent(self, difficulty: Difficulty) -> Opponent {
        match self {
            OpponentKind::Computer => Opponent::Computer(difficulty),
            OpponentKind::Human => Opponent::Human,
        }
    }
}
