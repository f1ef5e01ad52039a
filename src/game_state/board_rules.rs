//! Pure rules over a bit-packed position: swapping, win classification and
//! the fixed enumeration order of adjacent-swap coordinates.

use crate::errors::{SwapGameError, SwapGameResult};
use crate::game_state::board_types::{Board, Position, Side, StandardBoard, SwapMove};

impl<const WIDTH: usize, const HEIGHT: usize> Board<WIDTH, HEIGHT> {
    /// Canonical start position for this geometry.
    #[inline]
    pub const fn start_position() -> Position {
        Self::START_POSITION
    }

    #[inline]
    pub const fn cell_is_white(position: Position, index: usize) -> bool {
        (position >> index) & 1 == 1
    }

    /// True when the swap's anchor and partner are both on the board.
    pub const fn is_valid_swap(swap: SwapMove) -> bool {
        let anchor = swap.anchor as usize;
        if anchor >= Self::CELLS {
            return false;
        }
        if swap.vertical {
            anchor + WIDTH < Self::CELLS
        } else {
            anchor % WIDTH + 1 < WIDTH
        }
    }

    /// The cell the anchor exchanges its token with.
    #[inline]
    pub const fn partner_cell(swap: SwapMove) -> usize {
        if swap.vertical {
            swap.anchor as usize + WIDTH
        } else {
            swap.anchor as usize + 1
        }
    }

    /// Exchange the tokens on the anchor and its partner cell.
    ///
    /// Panics if the swap addresses a cell outside the board; callers that
    /// handle untrusted input go through `checked_swap`.
    #[inline]
    pub fn apply_swap(position: Position, swap: SwapMove) -> Position {
        assert!(
            Self::is_valid_swap(swap),
            "swap {:?} is outside a {}x{} board",
            swap,
            WIDTH,
            HEIGHT
        );
        let anchor = swap.anchor as usize;
        let partner = Self::partner_cell(swap);
        if Self::cell_is_white(position, anchor) == Self::cell_is_white(position, partner) {
            return position;
        }
        position ^ ((1 << anchor) | (1 << partner))
    }

    pub fn checked_swap(position: Position, swap: SwapMove) -> SwapGameResult<Position> {
        if !Self::is_valid_swap(swap) {
            return Err(SwapGameError::SwapOutOfBounds(swap));
        }
        Ok(Self::apply_swap(position, swap))
    }

    /// Black wins on an all-black top row, White on an all-white bottom row.
    /// Black is checked first.
    #[inline]
    pub const fn classify_winner(position: Position) -> Side {
        if position & Self::TOP_ROW_MASK == 0 {
            Side::Black
        } else if position & Self::BOTTOM_ROW_MASK == Self::BOTTOM_ROW_MASK {
            Side::White
        } else {
            Side::None
        }
    }

    #[inline]
    pub const fn black_in_top_row(position: Position) -> u32 {
        (!position & Self::TOP_ROW_MASK).count_ones()
    }

    #[inline]
    pub const fn white_in_bottom_row(position: Position) -> u32 {
        (position & Self::BOTTOM_ROW_MASK).count_ones()
    }

    /// Every adjacent-swap coordinate in generation order: horizontal anchors
    /// row-major (last column excluded), then vertical anchors row-major
    /// (last row excluded).
    pub fn swap_moves() -> impl Iterator<Item = SwapMove> {
        let horizontal = (0..HEIGHT).flat_map(|row| {
            (0..WIDTH.saturating_sub(1))
                .map(move |column| SwapMove::horizontal(Self::cell_index(column, row) as u8))
        });
        let vertical = (0..HEIGHT.saturating_sub(1)).flat_map(|row| {
            (0..WIDTH).map(move |column| SwapMove::vertical(Self::cell_index(column, row) as u8))
        });
        horizontal.chain(vertical)
    }

    /// Upper bound on successors of one position before repetition filtering.
    pub const fn max_branching() -> usize {
        WIDTH.saturating_sub(1) * HEIGHT + WIDTH * HEIGHT.saturating_sub(1)
    }
}

/// Swap on the 6x6 board.
#[inline]
pub fn apply_swap(position: Position, anchor: u8, vertical: bool) -> Position {
    StandardBoard::apply_swap(position, SwapMove::new(anchor, vertical))
}

#[inline]
pub fn classify_winner(position: Position) -> Side {
    StandardBoard::classify_winner(position)
}

#[inline]
pub fn other_side(side: Side) -> Side {
    side.opposite()
}
