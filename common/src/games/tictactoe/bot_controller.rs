use crate::games::SessionRng;
use super::board::get_available_moves;
use super::types::{Board, Difficulty, Mark};
use super::win_detector::{Outcome, classify};

/// The computer always plays O and is the maximizing side of the search.
pub const BOT_MARK: Mark = Mark::O;
pub const HUMAN_MARK: Mark = Mark::X;

const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    /// `None` at leaves; at inner nodes the first available move unless a later one scored strictly better.
    pub best_move: Option<usize>,
}

impl SearchResult {
    fn leaf(score: i32) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

/// Picks the computer's move. `None` when there is nothing left to play.
pub fn calculate_move(board: &Board, difficulty: Difficulty, rng: &mut SessionRng) -> Option<usize> {
    let available_moves = get_available_moves(board);
    if available_moves.is_empty() {
        return None;
    }

    let random_probability = difficulty.random_move_probability();
    if random_probability > 0.0 && rng.random_chance(random_probability) {
        return Some(calculate_random_move(&available_moves, rng));
    }

    calculate_minimax_move(board, difficulty.search_depth())
}

/// `available_moves` must be non-empty.
fn calculate_random_move(available_moves: &[usize], rng: &mut SessionRng) -> usize {
    let idx = rng.random_range(0..available_moves.len());
    available_moves[idx]
}

pub fn calculate_minimax_move(board: &Board, max_depth: usize) -> Option<usize> {
    let mut scratch = *board;
    minimax(&mut scratch, 0, max_depth, true, i32::MIN, i32::MAX).best_move
}

/// Alpha-beta minimax over `board`, restoring every cell it touches before returning.
///
/// Positions cut off at `max_depth` score 0, the same as a draw. Medium play
/// relies on that blind spot.
pub fn minimax(
    board: &mut Board,
    depth: usize,
    max_depth: usize,
    is_maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
) -> SearchResult {
    let plies = depth as i32;
    match classify(board) {
        Outcome::Win(mark) if mark == BOT_MARK => return SearchResult::leaf(WIN_SCORE - plies),
        Outcome::Win(_) => return SearchResult::leaf(plies - WIN_SCORE),
        Outcome::Draw => return SearchResult::leaf(0),
        Outcome::Nonterminal => {}
    }

    if depth >= max_depth {
        return SearchResult::leaf(0);
    }

    let available_moves = get_available_moves(board);
    let mut best_move = available_moves.first().copied();

    let (mark, mut best_score) = if is_maximizing {
        (BOT_MARK, i32::MIN)
    } else {
        (HUMAN_MARK, i32::MAX)
    };

    for index in available_moves {
        board[index] = mark;
        let score = minimax(board, depth + 1, max_depth, !is_maximizing, alpha, beta).score;
        board[index] = Mark::Empty;

        if is_maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(index);
            }
            alpha = alpha.max(best_score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(index);
            }
            beta = beta.min(best_score);
        }

        if beta <= alpha {
            break;
        }
    }

    SearchResult {
        score: best_score,
        best_move,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::check_win;

    fn board(cells: &str) -> Board {
        cells.parse().unwrap()
    }

    fn hard_move(board: &Board) -> Option<usize> {
        calculate_move(board, Difficulty::Hard, &mut SessionRng::new(0))
    }

    #[test]
    fn test_full_board_has_no_move() {
        let full = board("XOX XXO OXO");
        for difficulty in Difficulty::ALL {
            let mut rng = SessionRng::new(3);
            assert_eq!(calculate_move(&full, difficulty, &mut rng), None);
        }
    }

    #[test]
    fn test_single_empty_cell_is_always_played() {
        let last = board("XOX XOO OX.");
        for difficulty in Difficulty::ALL {
            for seed in 0..20 {
                let mut rng = SessionRng::new(seed);
                assert_eq!(calculate_move(&last, difficulty, &mut rng), Some(8));
            }
        }
    }

    #[test]
    fn test_hard_takes_immediate_win_over_block() {
        assert_eq!(hard_move(&board("XX. OO. ...")), Some(5));
    }

    #[test]
    fn test_hard_blocks_open_line() {
        assert_eq!(hard_move(&board("XX. .O. ...")), Some(2));
    }

    #[test]
    fn test_hard_answers_corner_with_center() {
        assert_eq!(hard_move(&board("X.. ... ...")), Some(4));
    }

    #[test]
    fn test_medium_misses_deep_threats() {
        let mut rng = SessionRng::new(0);
        assert_eq!(
            calculate_move(&board("X.. ... ..."), Difficulty::Medium, &mut rng),
            Some(1)
        );
    }

    #[test]
    fn test_medium_still_blocks_immediate_loss() {
        let mut rng = SessionRng::new(0);
        assert_eq!(
            calculate_move(&board("XX. .O. ..."), Difficulty::Medium, &mut rng),
            Some(2)
        );
    }

    #[test]
    fn test_hard_is_deterministic() {
        let position = board("X.. .O. ..X");
        let first = hard_move(&position);
        assert!(first.is_some());
        for seed in 0..10 {
            let mut rng = SessionRng::new(seed);
            assert_eq!(calculate_move(&position, Difficulty::Hard, &mut rng), first);
        }
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let position = board("X.. .O. ..X");
        let before = position;
        let mut scratch = position;
        minimax(&mut scratch, 0, 8, true, i32::MIN, i32::MAX);
        assert_eq!(scratch, before);
        hard_move(&position);
        assert_eq!(position, before);
    }

    #[test]
    fn test_leaf_scores_depend_on_depth() {
        let mut o_won = board("OOO XX. X..");
        assert_eq!(
            minimax(&mut o_won, 3, 8, true, i32::MIN, i32::MAX),
            SearchResult { score: 7, best_move: None }
        );

        let mut x_won = board("XXX OO. O..");
        assert_eq!(minimax(&mut x_won, 0, 8, true, i32::MIN, i32::MAX).score, -10);

        let mut cutoff = board("X.. ... ...");
        assert_eq!(
            minimax(&mut cutoff, 2, 2, true, i32::MIN, i32::MAX),
            SearchResult { score: 0, best_move: None }
        );
    }

    #[test]
    fn test_already_won_board_has_no_search_move() {
        assert_eq!(hard_move(&board("XXX OO. ...")), None);
    }

    fn assert_hard_never_loses(position: &mut Board) {
        match classify(position) {
            Outcome::Win(mark) => {
                assert_ne!(mark, HUMAN_MARK, "computer lost on\n{}", position);
                return;
            }
            Outcome::Draw => return,
            Outcome::Nonterminal => {}
        }

        for index in get_available_moves(position) {
            position[index] = HUMAN_MARK;
            if check_win(position).is_none()
                && let Some(reply) = hard_move(position)
            {
                position[reply] = BOT_MARK;
                assert_hard_never_loses(position);
                position[reply] = Mark::Empty;
            } else {
                assert_hard_never_loses(position);
            }
            position[index] = Mark::Empty;
        }
    }

    #[test]
    fn test_hard_never_loses_against_any_opponent() {
        assert_hard_never_loses(&mut Board::new());
    }

    #[test]
    fn test_hard_opening_on_empty_board() {
        // Every opening scores 0, so the first available cell is kept.
        let opening = hard_move(&Board::new());
        assert_eq!(opening, Some(0));

        let mut position = Board::new();
        position[0] = BOT_MARK;
        assert_hard_never_loses(&mut position);
    }

    #[test]
    fn test_random_move_picks_from_available_cells() {
        let available = [2, 5, 7];
        let mut rng = SessionRng::new(9);
        for _ in 0..50 {
            assert!(available.contains(&calculate_random_move(&available, &mut rng)));
        }
    }

    #[test]
    fn test_easy_mixes_random_and_searched_moves() {
        let position = board("X.. ... ...");
        let samples = 2000;
        let mut counts = [0usize; 9];
        let mut rng = SessionRng::new(42);

        for _ in 0..samples {
            let index = calculate_move(&position, Difficulty::Easy, &mut rng).unwrap();
            counts[index] += 1;
        }

        assert_eq!(counts[0], 0);
        assert!(counts[1..].iter().all(|&count| count > 0));

        // Searched moves always land on the center: 0.3 + 0.7 / 8.
        let center_share = counts[4] as f64 / samples as f64;
        assert!((0.32..0.46).contains(&center_share), "center share {}", center_share);

        let other_share = counts.iter().enumerate()
            .filter(|&(index, _)| index != 4)
            .map(|(_, &count)| count)
            .sum::<usize>() as f64
            / samples as f64;
        assert!((0.54..0.68).contains(&other_share), "other share {}", other_share);
    }
}
