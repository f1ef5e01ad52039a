//! Engine abstraction layer used by the text front end and the match harness.
//!
//! Defines common input parameters and output payloads so different computer
//! opponents can be selected at runtime behind a single trait interface.

use crate::errors::SwapGameResult;
use crate::game_state::board_types::SwapMove;
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Overrides the engine's configured depth for one request.
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` when the side to move has nothing to play.
    pub best_move: Option<SwapMove>,
    pub best_score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> SwapGameResult<EngineOutput>;
}
