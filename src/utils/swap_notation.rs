//! Text notation for cells and swaps.
//!
//! A cell is a file letter (`a` is the leftmost column) followed by a rank
//! number (`1` is the top row). A swap is written as its two cells, anchor
//! first: `a3a4` is the vertical swap anchored on `a3`, `c1d1` the horizontal
//! swap anchored on `c1`. Parsing accepts the cells in either order.

use crate::errors::{SwapGameError, SwapGameResult};
use crate::game_state::board_types::{Board, SwapMove};

pub fn cell_to_notation<const WIDTH: usize, const HEIGHT: usize>(
    index: usize,
) -> SwapGameResult<String> {
    if index >= Board::<WIDTH, HEIGHT>::CELLS || WIDTH > 26 {
        return Err(SwapGameError::InvalidNotation(format!("cell index {index}")));
    }
    let (column, row) = Board::<WIDTH, HEIGHT>::cell_coordinates(index);
    Ok(format!("{}{}", char::from(b'a' + column as u8), row + 1))
}

pub fn notation_to_cell<const WIDTH: usize, const HEIGHT: usize>(
    text: &str,
) -> SwapGameResult<usize> {
    let invalid = || SwapGameError::InvalidNotation(text.to_owned());

    let mut chars = text.chars();
    let file = chars
        .next()
        .filter(|c| c.is_ascii_alphabetic())
        .ok_or_else(invalid)?
        .to_ascii_lowercase();
    let rank = chars.as_str().parse::<usize>().map_err(|_| invalid())?;

    let column = (file as u8 - b'a') as usize;
    if column >= WIDTH || rank == 0 || rank > HEIGHT {
        return Err(invalid());
    }
    Ok(Board::<WIDTH, HEIGHT>::cell_index(column, rank - 1))
}

pub fn swap_to_notation<const WIDTH: usize, const HEIGHT: usize>(
    swap: SwapMove,
) -> SwapGameResult<String> {
    if !Board::<WIDTH, HEIGHT>::is_valid_swap(swap) {
        return Err(SwapGameError::SwapOutOfBounds(swap));
    }
    let anchor = cell_to_notation::<WIDTH, HEIGHT>(swap.anchor as usize)?;
    let partner = cell_to_notation::<WIDTH, HEIGHT>(Board::<WIDTH, HEIGHT>::partner_cell(swap))?;
    Ok(format!("{anchor}{partner}"))
}

pub fn notation_to_swap<const WIDTH: usize, const HEIGHT: usize>(
    text: &str,
) -> SwapGameResult<SwapMove> {
    let trimmed = text.trim();
    let invalid = || SwapGameError::InvalidNotation(trimmed.to_owned());

    let split = trimmed
        .char_indices()
        .skip(1)
        .find(|(_, c)| c.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .ok_or_else(invalid)?;
    let first = notation_to_cell::<WIDTH, HEIGHT>(&trimmed[..split])?;
    let second = notation_to_cell::<WIDTH, HEIGHT>(&trimmed[split..])?;

    let (anchor, partner) = (first.min(second), first.max(second));
    let swap = if partner == anchor + 1 && anchor % WIDTH + 1 < WIDTH {
        SwapMove::horizontal(anchor as u8)
    } else if partner == anchor + WIDTH {
        SwapMove::vertical(anchor as u8)
    } else {
        return Err(invalid());
    };

    if !Board::<WIDTH, HEIGHT>::is_valid_swap(swap) {
        return Err(invalid());
    }
    Ok(swap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board_types::StandardBoard;

    #[test]
    fn cells_use_files_for_columns_and_ranks_from_the_top() {
        assert_eq!(cell_to_notation::<6, 6>(0).unwrap(), "a1");
        assert_eq!(cell_to_notation::<6, 6>(5).unwrap(), "f1");
        assert_eq!(cell_to_notation::<6, 6>(12).unwrap(), "a3");
        assert_eq!(cell_to_notation::<6, 6>(35).unwrap(), "f6");
        assert!(cell_to_notation::<6, 6>(36).is_err());
    }

    #[test]
    fn swaps_are_written_anchor_first() {
        assert_eq!(swap_to_notation::<6, 6>(SwapMove::vertical(12)).unwrap(), "a3a4");
        assert_eq!(swap_to_notation::<6, 6>(SwapMove::horizontal(2)).unwrap(), "c1d1");
        assert!(swap_to_notation::<6, 6>(SwapMove::horizontal(5)).is_err());
    }

    #[test]
    fn parsing_accepts_either_cell_order() {
        assert_eq!(notation_to_swap::<6, 6>("a3a4").unwrap(), SwapMove::vertical(12));
        assert_eq!(notation_to_swap::<6, 6>("a4a3").unwrap(), SwapMove::vertical(12));
        assert_eq!(notation_to_swap::<6, 6>(" D1C1 ").unwrap(), SwapMove::horizontal(2));
    }

    #[test]
    fn parsing_rejects_non_adjacent_and_wrapping_cells() {
        assert!(notation_to_swap::<6, 6>("a1c1").is_err());
        assert!(notation_to_swap::<6, 6>("f1a2").is_err());
        assert!(notation_to_swap::<6, 6>("a1b2").is_err());
        assert!(notation_to_swap::<6, 6>("g1g2").is_err());
        assert!(notation_to_swap::<6, 6>("a6a7").is_err());
        assert!(notation_to_swap::<6, 6>("a0a1").is_err());
        assert!(notation_to_swap::<6, 6>("a1").is_err());
        assert!(notation_to_swap::<6, 6>("").is_err());
    }

    #[test]
    fn every_generated_swap_survives_notation() {
        for swap in StandardBoard::swap_moves() {
            let text = swap_to_notation::<6, 6>(swap).unwrap();
            assert_eq!(notation_to_swap::<6, 6>(&text).unwrap(), swap, "{text}");
        }
    }

    #[test]
    fn tall_boards_use_multi_digit_ranks() {
        let swap = SwapMove::vertical(27);
        let text = swap_to_notation::<3, 12>(swap).unwrap();
        assert_eq!(text, "a10a11");
        assert_eq!(notation_to_swap::<3, 12>(&text).unwrap(), swap);
    }
}
