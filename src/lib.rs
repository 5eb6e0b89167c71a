use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod registry;
pub mod rules;
pub mod types;

pub use error::{CheckersError, IllegalMove};
pub use game::Match;
pub use registry::Registry;
pub use types::{GameState, Move, MoveResult, Position, Side, Status};

static MATCHES: Lazy<Registry> = Lazy::new(Registry::default);

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Returns `{ board, turn, status, captures, pieces, moveCount }`, opening a
/// new match the first time `match_id` is seen.
#[wasm_bindgen(js_name = createOrFetch)]
pub fn create_or_fetch(match_id: &str) -> Result<JsValue, JsError> {
    let state = MATCHES.create_or_fetch(match_id)?;
    to_js(&state)
}

/// `from` and `to` are `[row, col]` arrays of integers.
#[wasm_bindgen(js_name = submitMove)]
pub fn submit_move(match_id: &str, from: JsValue, to: JsValue) -> Result<JsValue, JsError> {
    let from = position_from_js(from)?;
    let to = position_from_js(to)?;
    let result = MATCHES.submit_move(match_id, from, to)?;
    to_js(&result)
}

#[wasm_bindgen(js_name = legalMoves)]
pub fn legal_moves(match_id: &str) -> Result<JsValue, JsError> {
    let moves = MATCHES.legal_moves(match_id)?;
    to_js(&moves)
}

/// Forgets a match, returning its last state, or `null` if it was unknown.
#[wasm_bindgen(js_name = removeMatch)]
pub fn remove_match(match_id: &str) -> Result<JsValue, JsError> {
    to_js(&MATCHES.remove(match_id))
}

// Read as i64 so values past 255 or below 0 are rejected instead of wrapped.
fn position_from_js(value: JsValue) -> Result<Position, JsError> {
    let pair: Vec<i64> = serde_wasm_bindgen::from_value(value)?;
    Ok(Position::from_pair(&pair)?)
}

// Plain objects and `null` for empty cells, matching what the UI expects from JSON.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}
