//! Random-move opponent.
//!
//! Selects uniformly from legal swaps and is used as a baseline in match
//! series and as the easy setting of the text front end.

use rand::prelude::IndexedRandom;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::{SwapGameError, SwapGameResult};
use crate::game_state::game_state::GameState;

#[derive(Default)]
pub struct RandomEngine;

impl RandomEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "SwapGame Random"
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> SwapGameResult<EngineOutput> {
        let legal_swaps = game_state.legal_swaps();

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_swaps {}",
            legal_swaps.len()
        ));

        if let Some(depth) = params.depth {
            out.info_lines.push(format!(
                "info string random_engine requested_depth {}",
                depth
            ));
        }

        if legal_swaps.is_empty() {
            return Ok(out);
        }

        let mut rng = rand::rng();
        let picked = legal_swaps
            .as_slice()
            .choose(&mut rng)
            .ok_or_else(|| SwapGameError::EngineFailure("failed to choose a random swap".to_owned()))?;

        out.best_move = Some(*picked);
        Ok(out)
    }
}
