use crate::board::Board;
use crate::estimator::ScoreEstimator;
use crate::types::{EstimateParams, Point};

/// Test engine with constant fields and a preset dead-stone list.
pub(crate) struct FixedDeadStones {
    pub dead: Vec<Point>,
}

impl ScoreEstimator for FixedDeadStones {
    fn ownership(&self, board: &Board, _params: &EstimateParams) -> Vec<f32> {
        vec![0.25; board.len()]
    }

    fn territory(&self, board: &Board) -> Vec<f32> {
        vec![-0.5; board.len()]
    }

    fn dead_stones(&self, _board: &Board, _params: &EstimateParams) -> Vec<Point> {
        self.dead.clone()
    }
}
