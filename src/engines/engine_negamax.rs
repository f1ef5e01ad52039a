//! Computer opponent backed by the fixed-depth negamax search.
//!
//! Depth defaults to three plies. The real-game history is handed to the
//! search untouched, so the engine never proposes a repeated position while a
//! legal alternative exists.

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::SwapGameResult;
use crate::game_state::game_state::GameState;
use crate::search::negamax::{
    negamax_search, SearchConfig, MAX_SEARCH_DEPTH, SEARCH_DEPTH,
};
use crate::utils::swap_notation::swap_to_notation;

pub struct NegamaxEngine {
    default_depth: u8,
}

impl NegamaxEngine {
    pub fn new(default_depth: u8) -> Self {
        Self { default_depth }
    }

    pub fn depth(&self) -> u8 {
        self.default_depth
    }
}

impl Default for NegamaxEngine {
    fn default() -> Self {
        Self::new(SEARCH_DEPTH)
    }
}

impl Engine for NegamaxEngine {
    fn name(&self) -> &str {
        "SwapGame Negamax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Depth") {
            let parsed = value
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|depth| *depth <= MAX_SEARCH_DEPTH)
                .ok_or_else(|| {
                    format!("invalid Depth value '{value}' (0..={MAX_SEARCH_DEPTH})")
                })?;
            self.default_depth = parsed;
        }
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> SwapGameResult<EngineOutput> {
        let mut out = EngineOutput::default();

        if game_state.is_over() {
            out.info_lines.push(format!(
                "info string negamax_engine game_over winner {}",
                game_state.winner().name()
            ));
            return Ok(out);
        }

        let depth = params
            .depth
            .unwrap_or(self.default_depth)
            .min(MAX_SEARCH_DEPTH);
        let result = negamax_search::<6, 6>(
            game_state.position,
            game_state.history(),
            game_state.side_to_move,
            SearchConfig { max_depth: depth },
        );

        out.info_lines.push(format!(
            "info string negamax_engine depth {} nodes {} root_moves {} score {}",
            depth, result.nodes, result.root_moves, result.best_score
        ));

        if result.root_moves == 0 {
            out.info_lines
                .push("info string negamax_engine no legal swaps".to_owned());
            return Ok(out);
        }

        out.info_lines.push(format!(
            "info string negamax_engine best {}",
            swap_to_notation::<6, 6>(result.best_move)?
        ));
        out.best_move = Some(result.best_move);
        out.best_score = Some(result.best_score);
        Ok(out)
    }
}
