//! Line-oriented text front end and command loop.
//!
//! Parses commands from stdin, keeps the current game, routes `go` and
//! `play` to the selected opponent engine, and writes replies to stdout.

use std::io::{self, BufRead, Write};

use crate::engines::engine_negamax::NegamaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::board_types::{Side, SwapMove};
use crate::game_state::game_state::GameState;
use crate::search::negamax::{MAX_SEARCH_DEPTH, SEARCH_DEPTH};
use crate::utils::game_record::write_game_record_for;
use crate::utils::render_game_state::render_game_state;
use crate::utils::swap_notation::{notation_to_swap, swap_to_notation};

const ENGINE_NAME: &str = "Swap Game";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut front_end = TextProtocolState::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = front_end.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opponent {
    Negamax,
    Random,
}

impl Opponent {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "negamax" => Some(Self::Negamax),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

pub struct TextProtocolState {
    game_state: GameState,
    engine: Box<dyn Engine>,
    opponent: Opponent,
    debug_mode: bool,
}

impl Default for TextProtocolState {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProtocolState {
    pub fn new() -> Self {
        let opponent = Opponent::Negamax;
        Self {
            game_state: GameState::new_game(),
            engine: build_engine(opponent),
            opponent,
            debug_mode: false,
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Returns `Ok(true)` once `quit` has been read.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "hello" => {
                writeln!(out, "id name {} ({})", ENGINE_NAME, self.engine.name())?;
                writeln!(out, "option name Opponent type combo default negamax var negamax var random")?;
                writeln!(
                    out,
                    "option name Depth type spin default {} min 0 max {}",
                    SEARCH_DEPTH, MAX_SEARCH_DEPTH
                )?;
                writeln!(out, "ready")?;
            }
            "newgame" => {
                self.game_state = GameState::new_game();
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    writeln!(out, "info string position error: {}", err)?;
                }
            }
            "move" => {
                let text = parts.next().unwrap_or_default();
                match self.handle_move(text) {
                    Ok(()) => self.report_winner(out)?,
                    Err(err) => writeln!(out, "info string move error: {}", err)?,
                }
            }
            "go" => {
                if let Err(err) = self.handle_go(trimmed, out) {
                    writeln!(out, "info string go error: {}", err)?;
                    writeln!(out, "bestmove none")?;
                }
            }
            "play" => match self.handle_play(out) {
                Ok(()) => self.report_winner(out)?,
                Err(err) => writeln!(out, "info string play error: {}", err)?,
            },
            "show" => {
                writeln!(out, "{}", render_game_state(&self.game_state))?;
            }
            "record" => match write_game_record_for(&self.game_state) {
                Ok(text) => write!(out, "{}", text)?,
                Err(err) => writeln!(out, "info string record error: {}", err)?,
            },
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    writeln!(out, "info string setoption error: {}", err)?;
                }
            }
            "debug" => {
                let mode = parts.next().unwrap_or_default();
                self.debug_mode = mode.eq_ignore_ascii_case("on");
            }
            "quit" => {
                return Ok(true);
            }
            other => {
                writeln!(out, "info string unknown command '{}'", other)?;
            }
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        if name.eq_ignore_ascii_case("Opponent") {
            let opponent = Opponent::parse(&value)
                .ok_or_else(|| format!("invalid Opponent value '{}'", value))?;
            self.opponent = opponent;
            self.engine = build_engine(opponent);
            self.engine.new_game();
        } else {
            self.engine.set_option(&name, &value)?;
        }

        Ok(())
    }

    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace().skip(1).peekable();

        let mut base_state = match tokens.next() {
            Some("startpos") => GameState::new_game(),
            Some(other) => return Err(format!("unsupported position token '{}'", other)),
            None => return Err("incomplete position command".to_owned()),
        };

        if tokens.peek().copied() == Some("moves") {
            let _ = tokens.next();
            for text in tokens {
                let swap = notation_to_swap::<6, 6>(text).map_err(|e| e.to_string())?;
                base_state.commit_swap(swap).map_err(|e| e.to_string())?;
            }
        }

        self.game_state = base_state;
        Ok(())
    }

    fn handle_move(&mut self, text: &str) -> Result<(), String> {
        if text.is_empty() {
            return Err("missing swap after 'move'".to_owned());
        }
        let swap = notation_to_swap::<6, 6>(text).map_err(|e| e.to_string())?;
        self.game_state.commit_swap(swap).map_err(|e| e.to_string())?;
        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> Result<(), String> {
        let params = parse_go_params(line);
        let result = self.search(&params, out)?;

        match result.best_move {
            Some(best_move) => {
                let text = swap_to_notation::<6, 6>(best_move).map_err(|e| e.to_string())?;
                writeln!(out, "bestmove {}", text).map_err(|e| e.to_string())?;
            }
            None => writeln!(out, "bestmove none").map_err(|e| e.to_string())?,
        }

        Ok(())
    }

    fn handle_play(&mut self, out: &mut impl Write) -> Result<(), String> {
        let result = self.search(&GoParams::default(), out)?;
        let best_move: SwapMove = result
            .best_move
            .ok_or_else(|| "no legal swap for the side to move".to_owned())?;
        let text = swap_to_notation::<6, 6>(best_move).map_err(|e| e.to_string())?;
        self.game_state
            .commit_swap(best_move)
            .map_err(|e| e.to_string())?;
        writeln!(out, "played {}", text).map_err(|e| e.to_string())?;
        Ok(())
    }

    fn search(&mut self, params: &GoParams, out: &mut impl Write) -> Result<EngineOutput, String> {
        let result = self
            .engine
            .choose_move(&self.game_state, params)
            .map_err(|e| e.to_string())?;

        if self.debug_mode {
            for info in &result.info_lines {
                writeln!(out, "{}", info).map_err(|e| e.to_string())?;
            }
        }
        Ok(result)
    }

    fn report_winner(&self, out: &mut impl Write) -> io::Result<()> {
        match self.game_state.winner() {
            Side::None if self.game_state.is_blocked() => {
                writeln!(out, "info string {} is blocked", self.game_state.side_to_move.name())
            }
            Side::None => Ok(()),
            winner => writeln!(out, "winner {}", winner.name()),
        }
    }
}

fn parse_go_params(line: &str) -> GoParams {
    let mut params = GoParams::default();
    let mut tokens = line.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "depth" {
            params.depth = tokens.next().and_then(|x| x.parse::<u8>().ok());
        }
    }
    params
}

fn build_engine(opponent: Opponent) -> Box<dyn Engine> {
    match opponent {
        Opponent::Negamax => Box::new(NegamaxEngine::default()),
        Opponent::Random => Box::new(RandomEngine::new()),
    }
}
