use super::board::get_available_moves;
use super::bot_controller::minimax;
use super::types::{Board, Mark};

const HINT_SEARCH_DEPTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveHint {
    pub index: usize,
    /// 0..=100, relative to the other moves on the same board.
    pub win_chance: u8,
}

/// Rates every legal move for `player` by searching the reply tree after it.
///
/// Scores are normalised across the candidate moves, so the best move is always
/// 100 and the worst 0 unless all moves score the same.
pub fn calculate_move_hints(board: &Board, player: Mark) -> Result<Vec<MoveHint>, String> {
    if player == Mark::Empty {
        return Err("Move hints need a player mark".to_string());
    }

    let scored: Vec<(usize, i32)> = get_available_moves(board)
        .into_iter()
        .map(|index| {
            let mut scratch = *board;
            scratch[index] = player;
            let result = minimax(
                &mut scratch,
                0,
                HINT_SEARCH_DEPTH,
                player == Mark::X,
                i32::MIN,
                i32::MAX,
            );
            (index, result.score)
        })
        .collect();

    let Some(min_score) = scored.iter().map(|&(_, score)| score).min() else {
        return Ok(Vec::new());
    };
    let mut max_score = scored.iter().map(|&(_, score)| score).max().unwrap_or(min_score);
    if max_score == min_score {
        max_score = min_score + 1;
    }
    let range = (max_score - min_score) as f64;

    Ok(scored
        .into_iter()
        .map(|(index, score)| {
            let favourable = match player {
                Mark::O => score - min_score,
                _ => max_score - score,
            };
            MoveHint {
                index,
                win_chance: (favourable as f64 / range * 100.0).round() as u8,
            }
        })
        .collect())
}
