//! Terminal board renderer.
//!
//! `W` marks a white-aligned token, `B` a black-aligned one. Rank 1 (Black's
//! goal row) is printed first.

use crate::game_state::board_types::{Board, Position};
use crate::game_state::game_state::GameState;

/// Files are lettered up to 26 columns and numbered beyond that.
fn file_labels<const WIDTH: usize>() -> Vec<String> {
    (0..WIDTH)
        .map(|column| {
            if WIDTH <= 26 {
                char::from(b'a' + column as u8).to_string()
            } else {
                (column + 1).to_string()
            }
        })
        .collect()
}

pub fn render_position<const WIDTH: usize, const HEIGHT: usize>(position: Position) -> String {
    let labels = file_labels::<WIDTH>();
    let cell_width = labels.iter().map(String::len).max().unwrap_or(1);
    let files = labels
        .iter()
        .map(|label| format!("{label:>cell_width$}"))
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    out.push_str(&format!("   {files}\n"));

    for row in 0..HEIGHT {
        let tokens = (0..WIDTH)
            .map(|column| {
                let index = Board::<WIDTH, HEIGHT>::cell_index(column, row);
                let token = if Board::<WIDTH, HEIGHT>::cell_is_white(position, index) {
                    'W'
                } else {
                    'B'
                };
                format!("{token:>cell_width$}")
            })
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("{:>2} {}\n", row + 1, tokens));
    }

    out.push_str(&format!("   {files}"));
    out
}

/// Board plus side to move and winner lines.
pub fn render_game_state<const WIDTH: usize, const HEIGHT: usize>(
    game_state: &GameState<WIDTH, HEIGHT>,
) -> String {
    format!(
        "{}\nto move: {}  ply: {}  winner: {}",
        render_position::<WIDTH, HEIGHT>(game_state.position),
        game_state.side_to_move.name(),
        game_state.ply(),
        game_state.winner().name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board_types::StandardBoard;

    #[test]
    fn start_position_renders_white_on_top() {
        let rendered = render_position::<6, 6>(StandardBoard::START_POSITION);
        let lines = rendered.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "   a b c d e f");
        assert_eq!(lines[1], " 1 W W W W W W");
        assert_eq!(lines[3], " 3 W W W W W W");
        assert_eq!(lines[4], " 4 B B B B B B");
        assert_eq!(lines[6], " 6 B B B B B B");
    }

    #[test]
    fn wide_boards_number_their_files() {
        let rendered = render_position::<32, 2>(0);
        let header = rendered.lines().next().unwrap_or_default();

        assert!(header.ends_with("31 32"), "{header}");
        assert!(header.trim_start().starts_with("1  2"), "{header}");
        assert!(header.chars().all(|c| c.is_ascii_digit() || c == ' '), "{header}");
        assert!(rendered.lines().nth(1).unwrap_or_default().starts_with(" 1  B  B"));
    }

    #[test]
    fn game_state_summary_names_the_side_to_move() {
        let game: GameState = GameState::new_game();
        let rendered = render_game_state(&game);
        assert!(rendered.ends_with("to move: white  ply: 0  winner: none"));
    }
}
