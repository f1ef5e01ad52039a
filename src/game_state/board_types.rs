//! Core value types for the bit-packed swap board.
//!
//! A board is a zero-sized marker parameterised by its width and height, so
//! the geometry is fixed at compile time and every mask below is a constant.

/// One bit per cell, row-major. Bit = 1 holds a white-aligned token, bit = 0 a
/// black-aligned token. Only the low `WIDTH * HEIGHT` bits are meaningful.
pub type Position = u64;

pub const BOARD_WIDTH: usize = 6;
pub const BOARD_HEIGHT: usize = 6;

/// The reference 6x6 board.
pub type StandardBoard = Board<BOARD_WIDTH, BOARD_HEIGHT>;

/// Side to move, or the winner sentinel `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Side {
    #[default]
    None,
    /// Wins by filling the top row with black-aligned tokens.
    Black,
    /// Wins by filling the bottom row with white-aligned tokens.
    White,
}

impl Side {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
            Side::None => Side::None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Side::None => "none",
            Side::Black => "black",
            Side::White => "white",
        }
    }
}

/// Swap coordinates: the anchor cell and whether its partner lies below
/// (`vertical`) or to the right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SwapMove {
    pub anchor: u8,
    pub vertical: bool,
}

impl SwapMove {
    #[inline]
    pub const fn new(anchor: u8, vertical: bool) -> Self {
        Self { anchor, vertical }
    }

    #[inline]
    pub const fn horizontal(anchor: u8) -> Self {
        Self::new(anchor, false)
    }

    #[inline]
    pub const fn vertical(anchor: u8) -> Self {
        Self::new(anchor, true)
    }
}

/// Board geometry marker. All rules live in `board_rules` as associated
/// functions of this type.
///
/// Geometries past 64 cells fail to compile once the board is used:
///
/// ```compile_fail
/// use swap_game::game_state::board_types::Board;
///
/// let _ = Board::<9, 8>::CELLS;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Board<const WIDTH: usize, const HEIGHT: usize>;

impl<const WIDTH: usize, const HEIGHT: usize> Board<WIDTH, HEIGHT> {
    /// Cell count. Evaluating it rejects, at compile time, any geometry that
    /// does not fit in a `Position`.
    pub const CELLS: usize = {
        assert!(WIDTH * HEIGHT <= 64, "board does not fit in a 64-bit position");
        WIDTH * HEIGHT
    };

    /// Terminal reward; larger than any non-terminal heuristic value.
    pub const WIN_SCORE: i32 = 2 * WIDTH as i32;

    pub const FULL_MASK: Position = low_bits(Self::CELLS);
    pub const TOP_ROW_MASK: Position = if Self::CELLS == 0 {
        0
    } else {
        low_bits(WIDTH)
    };
    pub const BOTTOM_ROW_MASK: Position = if Self::CELLS == 0 {
        0
    } else {
        Self::TOP_ROW_MASK << (WIDTH * (HEIGHT - 1))
    };

    /// Top half of the board white-aligned, the rest black-aligned.
    pub const START_POSITION: Position = low_bits(WIDTH * (HEIGHT / 2));

    #[inline]
    pub const fn cell_index(column: usize, row: usize) -> usize {
        row * WIDTH + column
    }

    /// `(column, row)` of a linear cell index.
    #[inline]
    pub const fn cell_coordinates(index: usize) -> (usize, usize) {
        (index % WIDTH, index / WIDTH)
    }
}

/// Mask with the low `count` bits set; saturates at 64.
const fn low_bits(count: usize) -> Position {
    if count >= 64 {
        Position::MAX
    } else {
        (1 << count) - 1
    }
}
