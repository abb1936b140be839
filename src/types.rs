use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::config::EstimatorConfig;

/// Point state. Codes match the boundary encoding: 0=empty, 1=black, 2=white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    #[default]
    Empty = 0,
    Black = 1,
    White = 2,
}

impl Color {
    /// Normalizes a boundary color code.
    /// `-1` is the alternate white encoding; anything unknown stores as empty.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Black,
            2 | -1 => Self::White,
            _ => Self::Empty,
        }
    }

    /// Normalizes a side-to-move code. Unknown codes fall back to black.
    pub fn player_from_code(code: i32) -> Self {
        match code {
            2 | -1 => Self::White,
            _ => Self::Black,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// `+1.0` for black, `-1.0` for white, `0.0` for empty.
    pub fn sign(self) -> f32 {
        match self {
            Self::Empty => 0.0,
            Self::Black => 1.0,
            Self::White => -1.0,
        }
    }

    pub fn is_stone(self) -> bool {
        self != Self::Empty
    }
}

/// A board coordinate, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }
}

/// Board dimensions reported back across the boundary.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BoardDims {
    pub width: i32,
    pub height: i32,
}

impl BoardDims {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn len(self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// Side-to-move and rollout parameters accepted at the boundary.
///
/// Contract:
/// - Values are normalized, never rejected.
/// - The influence estimator reads none of them; a rollout-based engine
///   behind the same trait may.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateParams {
    pub player_to_move: Color,
    pub trials: u32,
    pub tolerance: f32,
}

impl EstimateParams {
    pub fn from_raw(
        player_to_move: i32,
        trials: i32,
        tolerance: f32,
        config: &EstimatorConfig,
    ) -> Self {
        let player = Color::player_from_code(player_to_move);
        if !matches!(player_to_move, 1 | 2 | -1) {
            tracing::debug!(player_to_move, "unknown side to move, using black");
        }

        let trials = u32::try_from(trials).unwrap_or_else(|_| {
            tracing::debug!(trials, "negative trials clamped to zero");
            0
        });

        let tolerance = if tolerance.is_finite() && tolerance >= 0.0 {
            tolerance
        } else {
            tracing::debug!(tolerance, "invalid tolerance replaced by default");
            config.default_tolerance
        };

        Self {
            player_to_move: player,
            trials,
            tolerance,
        }
    }
}

impl Default for EstimateParams {
    fn default() -> Self {
        let config = EstimatorConfig::default();
        Self {
            player_to_move: Color::Black,
            trials: config.default_trials,
            tolerance: config.default_tolerance,
        }
    }
}

/// Batch scoring request. Positions are `"x,y"` strings, 1-based.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreEstimateRequest {
    pub boards: Vec<BoardRequest>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardRequest {
    pub board_size: u8,
    #[serde(default)]
    pub black_stones: Vec<String>,
    #[serde(default)]
    pub white_stones: Vec<String>,
    #[serde(default)]
    pub next_to_move: Option<String>,
    #[serde(default)]
    pub trials: Option<i32>,
    #[serde(default)]
    pub tolerance: Option<f32>,
    #[serde(default)]
    pub komi: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEstimateResponse {
    pub results: Vec<BoardEstimate>,
}

/// Estimate for one board. Field vectors are row-major, `y * width + x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardEstimate {
    pub width: i32,
    pub height: i32,
    pub ownership: Vec<f32>,
    pub territory: Vec<f32>,
    pub dead_stones: Vec<Point>,
    pub summary: ScoreSummary,
    pub fingerprint: u32,
}

/// Point counts derived from an ownership field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub black_points: u32,
    pub white_points: u32,
    pub neutral_points: u32,
    /// Sum of the territory field.
    pub territory_balance: f32,
    pub komi: f32,
    /// `black_points - white_points - komi`; positive favours black.
    pub lead: f32,
}

impl ScoreSummary {
    pub fn from_fields(ownership: &[f32], territory: &[f32], komi: f32) -> Self {
        let mut black_points = 0u32;
        let mut white_points = 0u32;
        let mut neutral_points = 0u32;
        for &value in ownership {
            if value > 0.0 {
                black_points += 1;
            } else if value < 0.0 {
                white_points += 1;
            } else {
                neutral_points += 1;
            }
        }

        Self {
            black_points,
            white_points,
            neutral_points,
            territory_balance: territory.iter().sum(),
            komi,
            lead: black_points as f32 - white_points as f32 - komi,
        }
    }
}
