//! Flat boundary exported to the host.
//!
//! Callers hold an opaque `u32` handle from [`create_estimator`] and pass it
//! back to every other call. Output buffers are caller-allocated:
//! `width * height` floats for fields, `2 * max_count` ints for dead stones.
//! None of these calls can fail: an unknown or destroyed handle turns the
//! call into a no-op reporting zero dimensions or a zero count.

use wasm_bindgen::prelude::*;

use crate::batch;
use crate::config::EstimatorConfig;
use crate::handles::{self, NULL_HANDLE};
use crate::session::ScoreSession;
use crate::types::{BoardDims, Color, ScoreEstimateRequest};

/// Forwards Rust panics to the host console when the
/// `console_error_panic_hook` feature is enabled.
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Creates an empty board scored by the influence estimator.
/// Returns `0` when either side is below 1 or above the configured maximum.
#[wasm_bindgen]
pub fn create_estimator(width: i32, height: i32) -> u32 {
    match ScoreSession::with_influence_estimator(width, height) {
        Ok(session) => {
            let handle = handles::register(session);
            tracing::debug!(handle, width, height, "created estimator");
            handle
        }
        Err(err) => {
            tracing::warn!(%err, "create_estimator failed");
            NULL_HANDLE
        }
    }
}

/// Releases the board. The handle is dead afterwards.
#[wasm_bindgen]
pub fn destroy_estimator(handle: u32) {
    if let Err(err) = handles::release(handle) {
        tracing::warn!(%err, "destroy_estimator on dead handle");
    }
}

/// Color codes: 0=empty, 1=black, 2 or -1=white; anything else clears the
/// point. Off-board coordinates are ignored.
#[wasm_bindgen]
pub fn set_stone(handle: u32, x: i32, y: i32, color: i32) {
    if let Err(err) = handles::with_session_mut(handle, |session| session.set_stone(x, y, color)) {
        tracing::warn!(%err, "set_stone on dead handle");
    }
}

/// Fills `ownership` row-major with values in `[-1, 1]`.
/// `player_to_move`, `trials` and `tolerance` are accepted for engines that
/// use them; the influence estimator ignores them.
#[wasm_bindgen]
pub fn estimate_score(
    handle: u32,
    player_to_move: i32,
    trials: i32,
    tolerance: f32,
    ownership: &mut [f32],
) -> BoardDims {
    handles::with_session(handle, |session| {
        let params = session.params(player_to_move, trials, tolerance);
        session.estimate_score_into(&params, ownership)
    })
    .unwrap_or_else(|err| {
        tracing::warn!(%err, "estimate_score on dead handle");
        BoardDims::default()
    })
}

/// Fills `territory` row-major with signed, unclamped point values.
#[wasm_bindgen]
pub fn compute_territory(handle: u32, territory: &mut [f32]) -> BoardDims {
    handles::with_session(handle, |session| session.compute_territory_into(territory)).unwrap_or_else(
        |err| {
            tracing::warn!(%err, "compute_territory on dead handle");
            BoardDims::default()
        },
    )
}

/// Writes up to `max_count` dead stones as `x, y` pairs and returns the count.
#[wasm_bindgen]
pub fn get_dead_stones(
    handle: u32,
    trials: i32,
    tolerance: f32,
    dead_stones: &mut [i32],
    max_count: i32,
) -> i32 {
    handles::with_session(handle, |session| {
        let params = session.params(Color::Black.code().into(), trials, tolerance);
        session.dead_stones_into(&params, dead_stones, max_count)
    })
    .map(|count| count as i32)
    .unwrap_or_else(|err| {
        tracing::warn!(%err, "get_dead_stones on dead handle");
        0
    })
}

/// Scores a batch of boards given as
/// `{ boards: [{ board_size, black_stones, white_stones, next_to_move?, ... }] }`
/// with 1-based `"x,y"` positions.
#[wasm_bindgen(js_name = estimateBoards)]
pub fn estimate_boards(request: JsValue) -> Result<JsValue, JsError> {
    let request: ScoreEstimateRequest = serde_wasm_bindgen::from_value(request)?;
    let response = batch::estimate_batch(&request, &EstimatorConfig::default())?;
    Ok(serde_wasm_bindgen::to_value(&response)?)
}
