//! Scoring engines.
//!
//! Every engine sits behind [`ScoreEstimator`], so a session can be built on
//! the local influence engine or on an external rollout-based one without the
//! boundary changing.

pub mod influence;
#[cfg(test)]
pub(crate) mod fixed;

pub use influence::InfluenceEstimator;

use crate::board::Board;
use crate::types::{EstimateParams, Point};

pub trait ScoreEstimator: Send + Sync {
    /// Ownership in `[-1.0, 1.0]` per point, row-major.
    /// Positive leans black; stones report their own sign.
    fn ownership(&self, board: &Board, params: &EstimateParams) -> Vec<f32>;

    /// Signed net point value per point, row-major. Not clamped.
    fn territory(&self, board: &Board) -> Vec<f32>;

    /// Occupied points judged dead. Must be deterministic for a given board.
    fn dead_stones(&self, board: &Board, params: &EstimateParams) -> Vec<Point>;
}
