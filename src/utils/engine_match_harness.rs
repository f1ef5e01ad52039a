//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other without the text
//! front end, with an optional seeded random opening prefix.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::{SwapGameError, SwapGameResult};
use crate::game_state::board_types::Side;
use crate::game_state::game_state::GameState;
use crate::utils::swap_notation::swap_to_notation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWin,
    BlackWin,
    /// The side to move had no swap that avoids a repeated position.
    Blocked,
    MaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, side: Side },
    Blocked,
    MaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_min_plies: 0,
            opening_max_plies: 4,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub opening_moves: Vec<String>,
    pub played_moves: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub undecided: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} undecided={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.undecided,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match from the start position.
///
/// `engine_white` is White, `engine_black` is Black.
pub fn play_engine_match(
    mut engine_white: Box<dyn Engine>,
    mut engine_black: Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
) -> SwapGameResult<MatchResult> {
    play_engine_match_from_state_internal(
        GameState::new_game(),
        &mut engine_white,
        &mut engine_black,
        seed,
        config,
        true,
    )
}

/// Play a match from a caller-provided state without a random opening.
pub fn play_engine_match_from_state(
    mut engine_white: Box<dyn Engine>,
    mut engine_black: Box<dyn Engine>,
    start_state: GameState,
    seed: u64,
    config: MatchConfig,
) -> SwapGameResult<MatchResult> {
    play_engine_match_from_state_internal(
        start_state,
        &mut engine_white,
        &mut engine_black,
        seed,
        config,
        false,
    )
}

fn play_engine_match_from_state_internal(
    mut state: GameState,
    engine_white: &mut Box<dyn Engine>,
    engine_black: &mut Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
    apply_random_opening: bool,
) -> SwapGameResult<MatchResult> {
    engine_white.new_game();
    engine_black.new_game();

    let opening_moves = if apply_random_opening {
        apply_seeded_random_opening(
            &mut state,
            seed,
            config.opening_min_plies,
            config.opening_max_plies,
        )?
    } else {
        Vec::new()
    };

    let mut result = MatchResult {
        outcome: MatchOutcome::MaxPlies,
        final_state: GameState::new_game(),
        opening_moves,
        played_moves: Vec::new(),
        white_move_count: 0,
        black_move_count: 0,
        white_total_time_ns: 0,
        black_total_time_ns: 0,
    };

    for _ in 0..config.max_plies {
        match state.winner() {
            Side::White => {
                result.outcome = MatchOutcome::WhiteWin;
                break;
            }
            Side::Black => {
                result.outcome = MatchOutcome::BlackWin;
                break;
            }
            Side::None => {}
        }

        let legal_swaps = state.legal_swaps();
        if legal_swaps.is_empty() {
            result.outcome = MatchOutcome::Blocked;
            break;
        }

        let mover = state.side_to_move;
        let started = Instant::now();
        let out = if mover == Side::Black {
            engine_black.choose_move(&state, &config.go_params)?
        } else {
            engine_white.choose_move(&state, &config.go_params)?
        };
        let elapsed_ns = started.elapsed().as_nanos();

        if mover == Side::Black {
            result.black_move_count = result.black_move_count.saturating_add(1);
            result.black_total_time_ns = result.black_total_time_ns.saturating_add(elapsed_ns);
        } else {
            result.white_move_count = result.white_move_count.saturating_add(1);
            result.white_total_time_ns = result.white_total_time_ns.saturating_add(elapsed_ns);
        }

        let chosen = out.best_move.unwrap_or(legal_swaps[0]);
        if !legal_swaps.contains(&chosen) {
            return Err(SwapGameError::EngineFailure(format!(
                "engine returned illegal swap {chosen:?}"
            )));
        }

        result.played_moves.push(swap_to_notation::<6, 6>(chosen)?);
        state.commit_swap(chosen)?;
    }

    // The last ply may have produced the winner.
    if result.outcome == MatchOutcome::MaxPlies {
        result.outcome = match state.winner() {
            Side::White => MatchOutcome::WhiteWin,
            Side::Black => MatchOutcome::BlackWin,
            Side::None => MatchOutcome::MaxPlies,
        };
    }

    result.final_state = state;
    Ok(result)
}

/// Play a series of matches and aggregate win statistics.
///
/// Player sides are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> SwapGameResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut side_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_white = side_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (white, black) = if player1_is_white {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            println!(
                "[series] game {}/{} seed={} white={} black={}",
                i + 1,
                config.games,
                seed,
                white,
                black
            );
        }

        let result = if player1_is_white {
            play_engine_match(player1_factory(), player2_factory(), seed, config.per_game.clone())?
        } else {
            play_engine_match(player2_factory(), player1_factory(), seed, config.per_game.clone())?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_white {
            (
                result.white_move_count,
                result.black_move_count,
                result.white_total_time_ns,
                result.black_total_time_ns,
            )
        } else {
            (
                result.black_move_count,
                result.white_move_count,
                result.black_total_time_ns,
                result.white_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let winner_side = match result.outcome {
            MatchOutcome::WhiteWin => Some(Side::White),
            MatchOutcome::BlackWin => Some(Side::Black),
            MatchOutcome::Blocked | MatchOutcome::MaxPlies => None,
        };
        let mapped = match winner_side {
            Some(side) => {
                let player1_won = (side == Side::White) == player1_is_white;
                let player = if player1_won {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWin { player, side }
            }
            None => {
                stats.undecided += 1;
                if result.outcome == MatchOutcome::Blocked {
                    SeriesOutcome::Blocked
                } else {
                    SeriesOutcome::MaxPlies
                }
            }
        };
        stats.outcomes.push(mapped);

        if config.verbose {
            println!(
                "[series] game {}/{} result={:?} moves={} p1_wins={} p2_wins={} undecided={}\n",
                i + 1,
                config.games,
                mapped,
                result.played_moves.join(" "),
                stats.player1_wins,
                stats.player2_wins,
                stats.undecided
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

/// Commit between `min_plies` and `max_plies` uniformly random legal swaps.
fn apply_seeded_random_opening(
    state: &mut GameState,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> SwapGameResult<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening_moves = Vec::<String>::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        let legal_swaps = state.legal_swaps();
        if legal_swaps.is_empty() {
            break;
        }
        let chosen = legal_swaps[rng.random_range(0..legal_swaps.len())];
        opening_moves.push(swap_to_notation::<6, 6>(chosen)?);
        state.commit_swap(chosen)?;
    }

    Ok(opening_moves)
}
