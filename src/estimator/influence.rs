use crate::board::Board;
use crate::config::EstimatorConfig;
use crate::estimator::ScoreEstimator;
use crate::types::{Color, EstimateParams, Point};

/// Deterministic inverse-distance influence engine.
///
/// Each stone adds `1 / (1 + decay * distance)` to every empty point for its
/// color. Ownership normalizes the leading side by the sum of both sides;
/// territory takes the plain difference. Equal sums, including the empty
/// board, give exactly `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfluenceEstimator {
    ownership_decay: f64,
    territory_decay: f64,
}

impl InfluenceEstimator {
    pub fn new(config: &EstimatorConfig) -> Self {
        Self {
            ownership_decay: config.ownership_decay,
            territory_decay: config.territory_decay,
        }
    }
}

impl Default for InfluenceEstimator {
    fn default() -> Self {
        Self::new(&EstimatorConfig::default())
    }
}

impl ScoreEstimator for InfluenceEstimator {
    fn ownership(&self, board: &Board, _params: &EstimateParams) -> Vec<f32> {
        field(board, self.ownership_decay, |black, white| {
            let total = black + white;
            if black > white {
                black / total
            } else if white > black {
                -white / total
            } else {
                0.0
            }
        })
    }

    fn territory(&self, board: &Board) -> Vec<f32> {
        field(board, self.territory_decay, |black, white| {
            if black > white {
                black - white
            } else if white > black {
                -(white - black)
            } else {
                0.0
            }
        })
    }

    fn dead_stones(&self, _board: &Board, _params: &EstimateParams) -> Vec<Point> {
        // No stone removal is suggested; dead-stone inference needs rollouts.
        Vec::new()
    }
}

/// Runs `resolve(black, white)` on the influence sums of every empty point.
/// Stones keep their own sign.
fn field(board: &Board, decay: f64, resolve: impl Fn(f64, f64) -> f64) -> Vec<f32> {
    let black = board.stones(Color::Black);
    let white = board.stones(Color::White);

    board
        .points()
        .map(|(point, color)| {
            if color.is_stone() {
                color.sign()
            } else {
                let b = influence(point, &black, decay);
                let w = influence(point, &white, decay);
                resolve(b, w) as f32
            }
        })
        .collect()
}

fn influence(point: Point, stones: &[Point], decay: f64) -> f64 {
    stones
        .iter()
        .map(|&stone| 1.0 / (1.0 + decay * point.distance(stone)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(width: i32, height: i32, stones: &[(i32, i32, Color)]) -> Board {
        let mut board = Board::new(width, height).unwrap();
        for &(x, y, color) in stones {
            board.set(x, y, color);
        }
        board
    }

    fn at(field: &[f32], width: i32, x: i32, y: i32) -> f32 {
        field[(y * width + x) as usize]
    }

    #[test]
    fn empty_board_is_all_zero() {
        let estimator = InfluenceEstimator::default();
        let board = Board::new(9, 9).unwrap();

        let ownership = estimator.ownership(&board, &EstimateParams::default());
        let territory = estimator.territory(&board);

        assert_eq!(ownership.len(), 81);
        assert!(ownership.iter().all(|&v| v == 0.0));
        assert!(territory.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn single_point_board_without_stones() {
        let estimator = InfluenceEstimator::default();
        let board = Board::new(1, 1).unwrap();

        assert_eq!(estimator.ownership(&board, &EstimateParams::default()), vec![0.0]);
        assert_eq!(estimator.territory(&board), vec![0.0]);
        assert!(estimator.dead_stones(&board, &EstimateParams::default()).is_empty());
    }

    #[test]
    fn stones_report_full_confidence() {
        let estimator = InfluenceEstimator::default();
        let board = board_with(5, 5, &[(0, 0, Color::Black), (4, 3, Color::White), (2, 2, Color::Black)]);

        let ownership = estimator.ownership(&board, &EstimateParams::default());
        let territory = estimator.territory(&board);

        for (x, y, expected) in [(0, 0, 1.0), (2, 2, 1.0), (4, 3, -1.0)] {
            assert_eq!(at(&ownership, 5, x, y), expected);
            assert_eq!(at(&territory, 5, x, y), expected);
        }
    }

    #[test]
    fn diagonal_pair_on_two_by_two_splits_evenly() {
        let estimator = InfluenceEstimator::default();
        let board = board_with(2, 2, &[(0, 0, Color::Black), (1, 1, Color::White)]);

        let ownership = estimator.ownership(&board, &EstimateParams::default());
        let territory = estimator.territory(&board);

        assert_eq!(ownership, vec![1.0, 0.0, 0.0, -1.0]);
        assert_eq!(territory, vec![1.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn lone_black_stone_owns_whole_board() {
        let estimator = InfluenceEstimator::default();
        let board = board_with(7, 7, &[(3, 3, Color::Black)]);

        let ownership = estimator.ownership(&board, &EstimateParams::default());

        assert!(ownership.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn lone_stone_territory_decays_with_distance() {
        let estimator = InfluenceEstimator::default();
        let board = board_with(7, 1, &[(0, 0, Color::Black)]);

        let territory = estimator.territory(&board);

        for x in 1..7 {
            let expected = 1.0 / (1.0 + 0.5 * f64::from(x));
            assert_eq!(territory[x as usize], expected as f32);
        }
        assert!(territory.windows(2).skip(1).all(|w| w[0] > w[1]));
    }

    #[test]
    fn white_stone_mirrors_black() {
        let estimator = InfluenceEstimator::default();
        let black = board_with(5, 4, &[(1, 2, Color::Black)]);
        let white = board_with(5, 4, &[(1, 2, Color::White)]);
        let params = EstimateParams::default();

        let mirrored: Vec<f32> = estimator.ownership(&black, &params).iter().map(|v| -v).collect();
        assert_eq!(estimator.ownership(&white, &params), mirrored);

        let mirrored: Vec<f32> = estimator.territory(&black).iter().map(|v| -v).collect();
        assert_eq!(estimator.territory(&white), mirrored);
    }

    #[test]
    fn nearer_side_leads_empty_point() {
        let estimator = InfluenceEstimator::default();
        let board = board_with(5, 1, &[(0, 0, Color::Black), (4, 0, Color::White)]);

        let ownership = estimator.ownership(&board, &EstimateParams::default());
        let territory = estimator.territory(&board);

        // x=1: black at 1, white at 3.
        let b = 1.0 / 2.0;
        let w = 1.0 / 4.0;
        assert_eq!(ownership[1], (b / (b + w)) as f32);
        assert_eq!(ownership[2], 0.0);
        assert_eq!(ownership[3], -ownership[1]);

        let b = 1.0 / 1.5;
        let w = 1.0 / 2.5;
        assert_eq!(territory[1], (b - w) as f32);
        assert_eq!(territory[2], 0.0);
        assert_eq!(territory[3], -territory[1]);
    }

    #[test]
    fn side_to_move_does_not_change_output() {
        let estimator = InfluenceEstimator::default();
        let board = board_with(6, 6, &[(1, 1, Color::Black), (4, 2, Color::White), (2, 5, Color::White)]);
        let config = EstimatorConfig::default();

        let as_black = estimator.ownership(&board, &EstimateParams::from_raw(1, 10, 0.1, &config));
        let as_white = estimator.ownership(&board, &EstimateParams::from_raw(2, 5000, 0.9, &config));

        assert_eq!(as_black, as_white);
    }

    #[test]
    fn config_decay_changes_territory_reach() {
        let config = EstimatorConfig {
            territory_decay: 1.0,
            ..EstimatorConfig::default()
        };
        let estimator = InfluenceEstimator::new(&config);
        let board = board_with(3, 1, &[(0, 0, Color::Black)]);

        assert_eq!(estimator.territory(&board), vec![1.0, 0.5, 1.0 / 3.0]);
    }
}
