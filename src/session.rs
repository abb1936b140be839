use web_time::Instant;

use crate::board::Board;
use crate::config::EstimatorConfig;
use crate::error::EstimatorError;
use crate::estimator::{InfluenceEstimator, ScoreEstimator};
use crate::types::{BoardDims, BoardEstimate, Color, EstimateParams, Point, ScoreSummary};

/// A board paired with the engine chosen at construction.
///
/// Caller contract for the `*_into` methods:
/// - Output slices should hold at least `width * height` values
///   (`2 * max_count` for dead stones). Shorter slices are filled as far as
///   they go; nothing is written past their end.
pub struct ScoreSession {
    board: Board,
    config: EstimatorConfig,
    estimator: Box<dyn ScoreEstimator>,
}

impl ScoreSession {
    pub fn new(
        width: i32,
        height: i32,
        config: EstimatorConfig,
        estimator: Box<dyn ScoreEstimator>,
    ) -> Result<Self, EstimatorError> {
        Ok(Self {
            board: Board::with_max_side(width, height, config.max_side)?,
            config,
            estimator,
        })
    }

    pub fn with_influence_estimator(width: i32, height: i32) -> Result<Self, EstimatorError> {
        let config = EstimatorConfig::default();
        let estimator = Box::new(InfluenceEstimator::new(&config));
        Self::new(width, height, config, estimator)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn dims(&self) -> BoardDims {
        self.board.dims()
    }

    /// Writes a boundary color code at `(x, y)`. Off-board writes are ignored.
    pub fn set_stone(&mut self, x: i32, y: i32, color: i32) {
        if !self.board.set(x, y, Color::from_code(color)) {
            tracing::debug!(x, y, color, "ignored off-board stone");
        }
    }

    pub fn params(&self, player_to_move: i32, trials: i32, tolerance: f32) -> EstimateParams {
        EstimateParams::from_raw(player_to_move, trials, tolerance, &self.config)
    }

    pub fn ownership(&self, params: &EstimateParams) -> Vec<f32> {
        self.estimator.ownership(&self.board, params)
    }

    pub fn territory(&self) -> Vec<f32> {
        self.estimator.territory(&self.board)
    }

    /// Dead stones, truncated to `max_count`.
    pub fn dead_stones(&self, params: &EstimateParams, max_count: usize) -> Vec<Point> {
        let mut dead = self.estimator.dead_stones(&self.board, params);
        if dead.len() > max_count {
            tracing::debug!(found = dead.len(), max_count, "truncated dead stones");
            dead.truncate(max_count);
        }
        dead
    }

    pub fn estimate_score_into(&self, params: &EstimateParams, ownership: &mut [f32]) -> BoardDims {
        let values = self.ownership(params);
        copy_field(&values, ownership, "ownership");
        self.dims()
    }

    pub fn compute_territory_into(&self, territory: &mut [f32]) -> BoardDims {
        let values = self.territory();
        copy_field(&values, territory, "territory");
        self.dims()
    }

    /// Writes dead stones as interleaved `x, y` pairs and returns how many
    /// pairs were written. Never exceeds `max_count` or `out.len() / 2`.
    pub fn dead_stones_into(&self, params: &EstimateParams, out: &mut [i32], max_count: i32) -> usize {
        let capacity = usize::try_from(max_count).unwrap_or(0);
        let fits = out.len() / 2;
        if capacity > fits {
            tracing::warn!(max_count, buffer_len = out.len(), "dead stone buffer shorter than 2 * max_count");
        }

        let dead = self.dead_stones(params, capacity.min(fits));
        for (pair, point) in out.chunks_exact_mut(2).zip(&dead) {
            pair[0] = point.x;
            pair[1] = point.y;
        }
        dead.len()
    }

    /// Full estimate: ownership, territory, dead stones and a summary.
    pub fn estimate(&self, params: &EstimateParams, komi: f32) -> BoardEstimate {
        let started = Instant::now();
        let ownership = self.ownership(params);
        let territory = self.territory();
        let dead_stones = self.dead_stones(params, self.config.max_dead_stones);
        let summary = ScoreSummary::from_fields(&ownership, &territory, komi);
        let fingerprint = self.board.fingerprint();
        let (black, white) = self.board.count();

        tracing::debug!(
            width = self.board.width(),
            height = self.board.height(),
            black,
            white,
            fingerprint,
            lead = summary.lead,
            elapsed_us = started.elapsed().as_micros() as u64,
            "estimated position"
        );

        BoardEstimate {
            width: self.board.width(),
            height: self.board.height(),
            ownership,
            territory,
            dead_stones,
            summary,
            fingerprint,
        }
    }
}

fn copy_field(values: &[f32], out: &mut [f32], buffer: &'static str) {
    if out.len() < values.len() {
        tracing::warn!(buffer, expected = values.len(), buffer_len = out.len(), "output buffer too short");
    }
    let len = values.len().min(out.len());
    out[..len].copy_from_slice(&values[..len]);
}
