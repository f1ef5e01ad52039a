//! Static evaluation used at the search frontier.
//!
//! Scores are from the perspective of the side passed in: terminal positions
//! return `±WIN_SCORE`, everything else counts row progress toward each
//! side's goal edge.

use crate::game_state::board_types::{Board, Position, Side};

/// Heuristic score of `position` for `side`.
///
/// Non-terminal value is `black tokens in the top row - white tokens in the
/// bottom row`, negated for White. Its magnitude never exceeds `WIDTH`, so a
/// genuine win (`2 * WIDTH`) always dominates.
pub fn heuristic_score<const WIDTH: usize, const HEIGHT: usize>(
    side: Side,
    position: Position,
) -> i32 {
    let winner = Board::<WIDTH, HEIGHT>::classify_winner(position);
    if winner != Side::None {
        return if winner == side {
            Board::<WIDTH, HEIGHT>::WIN_SCORE
        } else {
            -Board::<WIDTH, HEIGHT>::WIN_SCORE
        };
    }

    let result = Board::<WIDTH, HEIGHT>::black_in_top_row(position) as i32
        - Board::<WIDTH, HEIGHT>::white_in_bottom_row(position) as i32;

    match side {
        Side::White => -result,
        Side::Black | Side::None => result,
    }
}
