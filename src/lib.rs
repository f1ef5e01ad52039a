//! Crate root module declarations for the Swap Game engine.
//!
//! Exposes the board model, move tree, search, engines, text front end and
//! utility helpers so binaries, benches and tests can import stable paths.

pub mod game_state {
    pub mod board_rules;
    pub mod board_types;
    pub mod game_state;
}

pub mod move_generation {
    pub mod move_node;
}

pub mod search {
    pub mod board_scoring;
    pub mod negamax;
}

pub mod engines {
    pub mod engine_negamax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod front_end {
    pub mod text_protocol;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod game_record;
    pub mod render_game_state;
    pub mod swap_notation;
}

pub mod errors;

pub use game_state::board_rules::{apply_swap, classify_winner, other_side};
pub use search::negamax::compute_move;
