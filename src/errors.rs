//! Errors used by the fallible surfaces of the swap game.
//!
//! The board and search kernel are total over valid input and do not return
//! errors. Everything that consumes outside input (notation, game records,
//! real-game commits, the text front end, engines) reports failures through
//! `SwapGameError`.

use std::error::Error;
use std::fmt;

use crate::game_state::board_types::{Position, SwapMove};

pub type SwapGameResult<T> = Result<T, SwapGameError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapGameError {
    /// The anchor/orientation pair addresses a cell outside the board.
    SwapOutOfBounds(SwapMove),
    /// Committing the swap would re-enter a position already reached in the game.
    RepeatedPosition(Position),
    /// A winner already exists; no further swaps may be committed.
    GameOver,
    /// A swap string could not be parsed.
    InvalidNotation(String),
    /// A game record was malformed.
    InvalidRecord(String),
    /// An engine failed to produce output.
    EngineFailure(String),
}

impl fmt::Display for SwapGameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapGameError::SwapOutOfBounds(swap) => write!(
                f,
                "swap anchor {} ({}) is out of bounds",
                swap.anchor,
                if swap.vertical { "vertical" } else { "horizontal" }
            ),
            SwapGameError::RepeatedPosition(position) => {
                write!(f, "position {position:#x} was already reached")
            }
            SwapGameError::GameOver => write!(f, "the game is already over"),
            SwapGameError::InvalidNotation(text) => write!(f, "invalid swap notation: {text}"),
            SwapGameError::InvalidRecord(msg) => write!(f, "invalid game record: {msg}"),
            SwapGameError::EngineFailure(msg) => write!(f, "engine failure: {msg}"),
        }
    }
}

impl Error for SwapGameError {}
