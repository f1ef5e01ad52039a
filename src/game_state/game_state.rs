//! Real (non-hypothetical) game state.
//!
//! Tracks the current position, the side to move, every position reached so
//! far, and the committed swaps. The history set is what the search treats as
//! forbidden: no real move may return to a position already seen.

use crate::errors::{SwapGameError, SwapGameResult};
use crate::game_state::board_types::{
    Board, Position, Side, SwapMove, BOARD_HEIGHT, BOARD_WIDTH,
};
use crate::move_generation::move_node::{MoveNode, PositionHistory};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState<const WIDTH: usize = BOARD_WIDTH, const HEIGHT: usize = BOARD_HEIGHT> {
    pub position: Position,
    pub side_to_move: Side,
    history: PositionHistory,
    move_history: Vec<SwapMove>,
}

impl<const WIDTH: usize, const HEIGHT: usize> Default for GameState<WIDTH, HEIGHT> {
    fn default() -> Self {
        Self::new_game()
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> GameState<WIDTH, HEIGHT> {
    /// Start position with White to move. The start position itself counts
    /// as visited.
    pub fn new_game() -> Self {
        Self::from_parts(Board::<WIDTH, HEIGHT>::START_POSITION, Side::White, PositionHistory::new())
    }

    /// Resume from an arbitrary position. `position` is added to `history`.
    pub fn from_parts(position: Position, side_to_move: Side, mut history: PositionHistory) -> Self {
        history.insert(position);
        Self {
            position,
            side_to_move,
            history,
            move_history: Vec::new(),
        }
    }

    #[inline]
    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    #[inline]
    pub fn move_history(&self) -> &[SwapMove] {
        &self.move_history
    }

    /// Swaps committed since this state was created.
    #[inline]
    pub fn ply(&self) -> usize {
        self.move_history.len()
    }

    #[inline]
    pub fn winner(&self) -> Side {
        Board::<WIDTH, HEIGHT>::classify_winner(self.position)
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.winner() != Side::None
    }

    /// Swaps the side to move may commit, in generation order.
    pub fn legal_swaps(&self) -> Vec<SwapMove> {
        if self.is_over() {
            return Vec::new();
        }
        MoveNode::<WIDTH, HEIGHT>::root(self.position, &self.history)
            .expand()
            .iter()
            .map(|child| child.swap)
            .collect()
    }

    /// True when the game is undecided but every swap would repeat a position.
    pub fn is_blocked(&self) -> bool {
        !self.is_over() && self.legal_swaps().is_empty()
    }

    pub fn is_legal(&self, swap: SwapMove) -> bool {
        self.check_swap(swap).is_ok()
    }

    fn check_swap(&self, swap: SwapMove) -> SwapGameResult<Position> {
        if self.is_over() {
            return Err(SwapGameError::GameOver);
        }
        let next = Board::<WIDTH, HEIGHT>::checked_swap(self.position, swap)?;
        if self.history.contains(&next) {
            return Err(SwapGameError::RepeatedPosition(next));
        }
        Ok(next)
    }

    /// Commit a real move: record it, hand the turn over and report the
    /// winner of the new position.
    pub fn commit_swap(&mut self, swap: SwapMove) -> SwapGameResult<Side> {
        let next = self.check_swap(swap)?;
        self.position = next;
        self.history.insert(next);
        self.move_history.push(swap);
        self.side_to_move = self.side_to_move.opposite();
        Ok(self.winner())
    }
}
