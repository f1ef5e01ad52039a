//! Fixed-depth negamax search with alpha-beta pruning.
//!
//! The search expands `MoveNode`s recursively, so every hypothetical line of
//! play is checked against its own ancestors and the real-game history. Move
//! order is the board's generation order and ties go to the later move, which
//! keeps the chosen swap reproducible.

use crate::game_state::board_types::{Board, Position, Side, StandardBoard, SwapMove};
use crate::move_generation::move_node::{MoveNode, PositionHistory};
use crate::search::board_scoring::heuristic_score;

/// Plies searched by the computer opponent.
pub const SEARCH_DEPTH: u8 = 3;

/// Deepest search the engines accept.
pub const MAX_SEARCH_DEPTH: u8 = 16;

/// Bound used for the root window; `-SCORE_BOUND` is safe to negate.
const SCORE_BOUND: i32 = i32::MAX;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: SEARCH_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: SwapMove,
    pub best_score: i32,
    /// Nodes visited, root included.
    pub nodes: u64,
    /// Legal moves available at the root.
    pub root_moves: usize,
}

/// Search `position` for `side` and return the chosen swap with its score.
///
/// When the root has no legal move (or already has a winner) the result is
/// `(0, horizontal)` scored by the heuristic of the unmodified position.
/// Interior nodes without a legal move are losses for the side to move.
pub fn negamax_search<const WIDTH: usize, const HEIGHT: usize>(
    position: Position,
    forbidden: &PositionHistory,
    side: Side,
    config: SearchConfig,
) -> SearchResult {
    let root = MoveNode::<WIDTH, HEIGHT>::root(position, forbidden);
    let undecided = Board::<WIDTH, HEIGHT>::classify_winner(position) == Side::None;
    let root_moves = if undecided { root.expand().len() } else { 0 };

    let mut nodes = 0u64;
    let (best_score, best_move) = if undecided && root_moves == 0 && config.max_depth > 0 {
        nodes = 1;
        (
            heuristic_score::<WIDTH, HEIGHT>(side, position),
            SwapMove::default(),
        )
    } else {
        negamax(
            &root,
            config.max_depth,
            -SCORE_BOUND,
            SCORE_BOUND,
            side,
            &mut nodes,
        )
    };

    SearchResult {
        best_move,
        best_score,
        nodes,
        root_moves,
    }
}

/// Best swap for `side` on the 6x6 board at the default depth.
pub fn compute_move(position: Position, forbidden: &PositionHistory, side: Side) -> SwapMove {
    negamax_search::<6, 6>(position, forbidden, side, SearchConfig::default()).best_move
}

/// Generic form of `compute_move` for other board geometries.
pub fn compute_move_on<const WIDTH: usize, const HEIGHT: usize>(
    position: Position,
    forbidden: &PositionHistory,
    side: Side,
) -> SwapMove {
    negamax_search::<WIDTH, HEIGHT>(position, forbidden, side, SearchConfig::default()).best_move
}

fn negamax<const WIDTH: usize, const HEIGHT: usize>(
    node: &MoveNode<'_, WIDTH, HEIGHT>,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    side: Side,
    nodes: &mut u64,
) -> (i32, SwapMove) {
    *nodes += 1;

    if depth == 0 || Board::<WIDTH, HEIGHT>::classify_winner(node.result) != Side::None {
        return (heuristic_score::<WIDTH, HEIGHT>(side, node.result), node.swap);
    }

    // Below the root a node without legal swaps keeps -SCORE_BOUND.
    let children = node.expand();
    let mut best_score = -SCORE_BOUND;
    let mut best_move = SwapMove::default();

    for child in &children {
        let (child_score, _) = negamax(child, depth - 1, -beta, -alpha, side.opposite(), nodes);
        let score = -child_score;

        // Later moves win ties.
        if score >= best_score {
            best_score = score;
            best_move = child.swap;
        }
        if score >= alpha {
            alpha = score;
        }
        if alpha >= beta {
            break;
        }
    }

    (best_score, best_move)
}

/// Resulting position of the move `compute_move` would pick; convenience for
/// front ends that preview the computer's reply.
pub fn preview_reply(position: Position, forbidden: &PositionHistory, side: Side) -> Position {
    StandardBoard::apply_swap(position, compute_move(position, forbidden, side))
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    const START: Position = StandardBoard::START_POSITION;

    /// White to move; swapping 29 down completes the bottom row. That swap is
    /// the last coordinate in generation order.
    fn white_one_swap_from_winning() -> Position {
        let bottom_but_last = (30..35).fold(0u64, |acc, index| acc | (1 << index));
        StandardBoard::TOP_ROW_MASK | bottom_but_last | (1 << 29)
    }

    #[test]
    fn start_position_returns_a_legal_move_for_white() {
        let forbidden = PositionHistory::new();
        let swap = compute_move(START, &forbidden, Side::White);
        let next = StandardBoard::apply_swap(START, swap);

        assert_ne!(next, START);
        assert!(!forbidden.contains(&next));
    }

    #[test]
    fn start_position_respects_forbidden_positions() {
        let mut forbidden = PositionHistory::new();
        forbidden.insert(START);
        for anchor in [12u8, 13, 14] {
            forbidden.insert(StandardBoard::apply_swap(START, SwapMove::vertical(anchor)));
        }

        let swap = compute_move(START, &forbidden, Side::White);
        let next = StandardBoard::apply_swap(START, swap);

        assert_ne!(next, START);
        assert!(!forbidden.contains(&next));
        assert!(swap.vertical && (15..18).contains(&swap.anchor));
    }

    #[test]
    fn search_selects_the_immediate_win() {
        let position = white_one_swap_from_winning();
        assert_eq!(StandardBoard::classify_winner(position), Side::None);

        let forbidden = PositionHistory::new();
        let result = negamax_search::<6, 6>(position, &forbidden, Side::White, SearchConfig::default());

        assert_eq!(result.best_move, SwapMove::vertical(29));
        assert_eq!(result.best_score, StandardBoard::WIN_SCORE);
        assert_eq!(
            StandardBoard::classify_winner(StandardBoard::apply_swap(position, result.best_move)),
            Side::White
        );
    }

    #[test]
    fn equal_scores_resolve_to_the_last_generated_move() {
        // At depth 1 every middle-row swap leaves both goal rows untouched, so
        // all six children score 0 and the last one is kept.
        let forbidden = PositionHistory::new();
        let result = negamax_search::<6, 6>(
            START,
            &forbidden,
            Side::White,
            SearchConfig { max_depth: 1 },
        );

        assert_eq!(result.best_move, SwapMove::vertical(17));
        assert_eq!(result.best_score, 0);
        assert_eq!(result.root_moves, 6);
        assert_eq!(result.nodes, 7);
    }

    #[test]
    fn exhausted_root_falls_back_to_first_anchor_and_static_score() {
        let forbidden = StandardBoard::swap_moves()
            .map(|swap| StandardBoard::apply_swap(START, swap))
            .collect::<PositionHistory>();

        let result =
            negamax_search::<6, 6>(START, &forbidden, Side::White, SearchConfig::default());

        assert_eq!(result.best_move, SwapMove::horizontal(0));
        assert_eq!(result.best_score, heuristic_score::<6, 6>(Side::White, START));
        assert_eq!(result.root_moves, 0);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn trapping_the_opponent_outranks_every_other_line() {
        // After h0 White's only swaps lead back to 2 or 8, both forbidden.
        let forbidden = PositionHistory::from([2, 8]);
        let result = negamax_search::<3, 2>(2, &forbidden, Side::Black, SearchConfig::default());

        assert_eq!(result.best_move, SwapMove::horizontal(0));
        assert_eq!(result.best_score, SCORE_BOUND);
        assert_eq!(compute_move_on::<3, 2>(2, &forbidden, Side::Black), SwapMove::horizontal(0));
    }

    #[test]
    fn chosen_move_never_reaches_a_forbidden_position() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..300 {
            let position = rng.random::<u64>() & Board::<3, 3>::FULL_MASK;
            let mut forbidden = PositionHistory::new();
            if rng.random_bool(0.5) {
                forbidden.insert(position);
            }
            for swap in Board::<3, 3>::swap_moves() {
                if rng.random_range(0..3) == 0 {
                    forbidden.insert(Board::<3, 3>::apply_swap(position, swap));
                }
            }
            let side = if rng.random_bool(0.5) { Side::Black } else { Side::White };

            let result =
                negamax_search::<3, 3>(position, &forbidden, side, SearchConfig::default());
            if result.root_moves == 0 {
                assert_eq!(result.best_move, SwapMove::default());
                continue;
            }

            let next = Board::<3, 3>::apply_swap(position, result.best_move);
            assert_ne!(next, position, "{position:#x}");
            assert!(!forbidden.contains(&next), "{position:#x}");
        }
    }

    #[test]
    fn zero_width_board_returns_the_degenerate_move() {
        let forbidden = PositionHistory::new();
        let result = negamax_search::<0, 6>(0, &forbidden, Side::Black, SearchConfig::default());

        assert_eq!(result.best_move, SwapMove::horizontal(0));
        assert_eq!(result.best_score, 0);
        assert_eq!(compute_move_on::<0, 6>(0, &forbidden, Side::White), SwapMove::horizontal(0));
    }

    #[test]
    fn depth_zero_scores_the_root_only() {
        let forbidden = PositionHistory::new();
        let result = negamax_search::<6, 6>(
            START,
            &forbidden,
            Side::Black,
            SearchConfig { max_depth: 0 },
        );

        assert_eq!(result.best_move, SwapMove::horizontal(0));
        assert_eq!(result.best_score, 0);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn search_does_not_touch_the_forbidden_set() {
        let mut forbidden = PositionHistory::new();
        forbidden.insert(START);
        let before = forbidden.clone();

        let _ = compute_move(START, &forbidden, Side::Black);
        assert_eq!(forbidden, before);
    }

    #[test]
    fn search_is_deterministic() {
        let forbidden = PositionHistory::new();
        let first = compute_move(START, &forbidden, Side::Black);
        let second = compute_move(START, &forbidden, Side::Black);
        assert_eq!(first, second);
    }

    #[test]
    fn preview_reply_applies_the_chosen_move() {
        let forbidden = PositionHistory::new();
        let position = white_one_swap_from_winning();
        let reply = preview_reply(position, &forbidden, Side::White);
        assert_eq!(StandardBoard::classify_winner(reply), Side::White);
    }
}
