//! Move-tree nodes and the repetition rule.
//!
//! A node is a candidate transition into a child position. It borrows its
//! parent and the real-game history, so a whole hypothetical line of play
//! lives on the call stack of the search that expanded it and is released as
//! each frame returns.

use std::collections::HashSet;

use crate::game_state::board_types::{Board, Position, SwapMove};

/// Positions already reached in the real (non-hypothetical) game.
pub type PositionHistory = HashSet<Position>;

#[derive(Debug, Clone, Copy)]
pub struct MoveNode<'a, const WIDTH: usize, const HEIGHT: usize> {
    /// Swap that produced `result`. Meaningless at the root.
    pub swap: SwapMove,
    pub result: Position,
    parent: Option<&'a MoveNode<'a, WIDTH, HEIGHT>>,
    history: &'a PositionHistory,
}

impl<'a, const WIDTH: usize, const HEIGHT: usize> MoveNode<'a, WIDTH, HEIGHT> {
    /// Root of a search: no parent, anchored on the caller's position and
    /// real-game history.
    pub fn root(position: Position, history: &'a PositionHistory) -> Self {
        Self {
            swap: SwapMove::default(),
            result: position,
            parent: None,
            history,
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<&'a MoveNode<'a, WIDTH, HEIGHT>> {
        self.parent
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// This node followed by each ancestor up to the root.
    pub fn lineage(&self) -> impl Iterator<Item = &MoveNode<'a, WIDTH, HEIGHT>> + '_ {
        std::iter::successors(Some(self), |node| node.parent)
    }

    /// Plies from the root to this node.
    pub fn depth(&self) -> usize {
        self.lineage().count() - 1
    }

    /// A candidate position is illegal when it repeats this node's position,
    /// any ancestor's position, or any position of the real game.
    pub fn is_repetition(&self, candidate: Position) -> bool {
        self.lineage().any(|node| node.result == candidate) || self.history.contains(&candidate)
    }

    /// Legal children in generation order; empty when every successor repeats.
    pub fn expand(&self) -> Vec<MoveNode<'_, WIDTH, HEIGHT>> {
        let mut children = Vec::with_capacity(Board::<WIDTH, HEIGHT>::max_branching());
        for swap in Board::<WIDTH, HEIGHT>::swap_moves() {
            let result = Board::<WIDTH, HEIGHT>::apply_swap(self.result, swap);
            if self.is_repetition(result) {
                continue;
            }
            children.push(MoveNode {
                swap,
                result,
                parent: Some(self),
                history: self.history,
            });
        }
        children
    }
}
