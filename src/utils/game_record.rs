//! Game record read/write for replay and analysis.
//!
//! The format follows PGN conventions: `[Key "Value"]` header lines, a blank
//! line, then numbered movetext in swap notation ending with a result token
//! (`1-0` White won, `0-1` Black won, `*` undecided).

use std::collections::BTreeMap;

use chrono::Local;

use crate::errors::{SwapGameError, SwapGameResult};
use crate::game_state::board_types::{Position, Side, StandardBoard, SwapMove};
use crate::game_state::game_state::GameState;
use crate::move_generation::move_node::PositionHistory;
use crate::utils::swap_notation::{notation_to_swap, swap_to_notation};

#[derive(Debug, Clone)]
pub struct GameRecord {
    pub headers: BTreeMap<String, String>,
    pub initial_state: GameState,
    pub move_history: Vec<SwapMove>,
    pub final_state: GameState,
    pub result: String,
}

pub fn result_token(winner: Side) -> &'static str {
    match winner {
        Side::White => "1-0",
        Side::Black => "0-1",
        Side::None => "*",
    }
}

/// Write `move_history` played from `initial_state` with default headers.
pub fn write_game_record(
    initial_state: &GameState,
    move_history: &[SwapMove],
    result: &str,
) -> SwapGameResult<String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Swap Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), normalize_result(result).to_owned());

    if initial_state.position != StandardBoard::START_POSITION
        || initial_state.side_to_move != Side::White
    {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("Position".to_owned(), format!("{:#x}", initial_state.position));
        headers.insert("ToMove".to_owned(), initial_state.side_to_move.name().to_owned());
    }

    write_game_record_with_headers(initial_state, move_history, &headers)
}

/// Write the whole of a finished or ongoing game. The starting position is
/// recovered by undoing the committed swaps, since every swap is its own
/// inverse.
pub fn write_game_record_for(game_state: &GameState) -> SwapGameResult<String> {
    let initial_position = game_state
        .move_history()
        .iter()
        .rev()
        .fold(game_state.position, |position, swap| {
            StandardBoard::apply_swap(position, *swap)
        });
    let initial_side = if game_state.ply() % 2 == 0 {
        game_state.side_to_move
    } else {
        game_state.side_to_move.opposite()
    };
    let initial = GameState::from_parts(initial_position, initial_side, PositionHistory::new());
    write_game_record(
        &initial,
        game_state.move_history(),
        result_token(game_state.winner()),
    )
}

pub fn write_game_record_with_headers(
    initial_state: &GameState,
    move_history: &[SwapMove],
    headers: &BTreeMap<String, String>,
) -> SwapGameResult<String> {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_value(value)));
    }
    out.push('\n');

    let mut state = initial_state.clone();
    let mut movetext_parts = Vec::<String>::with_capacity(move_history.len() + 1);
    for (ply, swap) in move_history.iter().enumerate() {
        let text = swap_to_notation::<6, 6>(*swap)?;
        if ply % 2 == 0 {
            movetext_parts.push(format!("{}. {}", (ply / 2) + 1, text));
        } else {
            movetext_parts.push(text);
        }
        state.commit_swap(*swap)?;
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    Ok(out)
}

/// Parse a record and replay it; every swap must be legal in sequence.
pub fn read_game_record(text: &str) -> SwapGameResult<GameRecord> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let initial_state = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        let position = headers
            .get("Position")
            .ok_or_else(|| invalid("SetUp=1 is present but Position header is missing"))
            .and_then(|x| parse_position(x))?;
        let side = match headers.get("ToMove").map(|x| x.as_str()) {
            Some("black") => Side::Black,
            Some("white") | None => Side::White,
            Some(other) => return Err(invalid(&format!("unknown ToMove value '{other}'"))),
        };
        GameState::from_parts(position, side, PositionHistory::new())
    } else {
        GameState::new_game()
    };

    let mut state = initial_state.clone();
    let mut move_history = Vec::<SwapMove>::new();
    let mut result = "*".to_owned();

    for token in movetext_lines.join(" ").split_whitespace() {
        if is_move_number_token(token) {
            continue;
        }
        if is_result_token(token) {
            result = token.to_owned();
            break;
        }

        let swap = notation_to_swap::<6, 6>(token)?;
        state.commit_swap(swap)?;
        move_history.push(swap);
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(GameRecord {
        headers,
        initial_state,
        move_history,
        final_state: state,
        result,
    })
}

fn invalid(msg: &str) -> SwapGameError {
    SwapGameError::InvalidRecord(msg.to_owned())
}

fn parse_position(text: &str) -> SwapGameResult<Position> {
    let digits = text.trim().trim_start_matches("0x");
    let position = Position::from_str_radix(digits, 16)
        .map_err(|_| invalid(&format!("invalid Position value '{text}'")))?;
    if position & !StandardBoard::FULL_MASK != 0 {
        return Err(invalid(&format!("Position '{text}' has bits outside the board")));
    }
    Ok(position)
}

fn parse_header_line(line: &str) -> SwapGameResult<(String, String)> {
    if !line.starts_with('[') || !line.ends_with(']') {
        return Err(invalid(&format!("invalid header line: {line}")));
    }
    let inner = &line[1..line.len() - 1];
    let mut parts = inner.splitn(2, ' ');
    let key = parts
        .next()
        .ok_or_else(|| invalid(&format!("invalid header key: {line}")))?
        .trim();
    let value_raw = parts
        .next()
        .ok_or_else(|| invalid(&format!("invalid header value: {line}")))?
        .trim();

    if !value_raw.starts_with('"') || !value_raw.ends_with('"') || value_raw.len() < 2 {
        return Err(invalid(&format!("invalid quoted header value: {line}")));
    }
    let value = value_raw[1..value_raw.len() - 1].replace("\\\"", "\"");
    Ok((key.to_owned(), value))
}

fn is_move_number_token(token: &str) -> bool {
    token.ends_with('.')
        && token
            .trim_end_matches('.')
            .chars()
            .all(|c| c.is_ascii_digit())
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut GameState, moves: &[&str]) -> Vec<SwapMove> {
        moves
            .iter()
            .map(|text| {
                let swap = notation_to_swap::<6, 6>(text).expect("notation should parse");
                game.commit_swap(swap).expect("swap should be legal");
                swap
            })
            .collect()
    }

    #[test]
    fn record_replays_to_the_same_final_position() {
        let mut game: GameState = GameState::new_game();
        let history = play(&mut game, &["a3a4", "b4b3", "c3c4", "a2a3"]);

        let text = write_game_record(&GameState::new_game(), &history, "*")
            .expect("record should write");
        assert!(text.contains("1. a3a4 b3b4 2. c3c4 a2a3 *"));

        let parsed = read_game_record(&text).expect("record should parse");
        assert_eq!(parsed.move_history, history);
        assert_eq!(parsed.final_state.position, game.position);
        assert_eq!(parsed.final_state.side_to_move, game.side_to_move);
        assert_eq!(parsed.result, "*");
        assert!(parsed.headers.contains_key("Date"));
    }

    #[test]
    fn record_for_game_recovers_the_start_position() {
        let mut game: GameState = GameState::new_game();
        play(&mut game, &["f3f4", "e4e3"]);

        let text = write_game_record_for(&game).expect("record should write");
        assert!(!text.contains("SetUp"));

        let parsed = read_game_record(&text).expect("record should parse");
        assert_eq!(parsed.initial_state.position, StandardBoard::START_POSITION);
        assert_eq!(parsed.final_state.position, game.position);
    }

    #[test]
    fn custom_setup_round_trips() {
        let position = StandardBoard::TOP_ROW_MASK | (0x1f << 30) | (1 << 29);
        let initial: GameState = GameState::from_parts(position, Side::White, PositionHistory::new());
        let history = vec![SwapMove::vertical(29)];

        let text = write_game_record(&initial, &history, "1-0").expect("record should write");
        assert!(text.contains("[SetUp \"1\"]"));

        let parsed = read_game_record(&text).expect("record should parse");
        assert_eq!(parsed.initial_state.position, position);
        assert_eq!(parsed.final_state.winner(), Side::White);
        assert_eq!(parsed.result, "1-0");
    }

    #[test]
    fn repeated_positions_are_rejected_on_replay() {
        let text = "[Event \"Bad\"]\n\n1. a3a4 a3a4 *\n";
        let err = read_game_record(text).expect_err("undoing a swap repeats a position");
        assert!(matches!(err, SwapGameError::RepeatedPosition(_)));
    }

    #[test]
    fn malformed_headers_are_rejected() {
        let err = read_game_record("[Event Bad]\n").expect_err("unquoted header");
        assert!(matches!(err, SwapGameError::InvalidRecord(_)));

        let err = read_game_record("[SetUp \"1\"]\n[Position \"0xzz\"]\n")
            .expect_err("bad position");
        assert!(matches!(err, SwapGameError::InvalidRecord(_)));
    }
}
