use serde::Deserialize;

const DEFAULT_OWNERSHIP_DECAY: f64 = 1.0;
const DEFAULT_TERRITORY_DECAY: f64 = 0.5;
const DEFAULT_TRIALS: u32 = 1000;
const DEFAULT_TOLERANCE: f32 = 0.35;
const DEFAULT_MAX_DEAD_STONES: usize = 1000;
const DEFAULT_KOMI: f32 = 7.5;
const DEFAULT_MAX_SIDE: i32 = 25;

/// Estimator tuning.
///
/// A stone at distance `d` contributes `1 / (1 + decay * d)` to a point.
/// Missing fields deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub ownership_decay: f64,
    pub territory_decay: f64,
    pub default_trials: u32,
    pub default_tolerance: f32,
    pub max_dead_stones: usize,
    pub default_komi: f32,
    /// Largest accepted board side.
    pub max_side: i32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            ownership_decay: DEFAULT_OWNERSHIP_DECAY,
            territory_decay: DEFAULT_TERRITORY_DECAY,
            default_trials: DEFAULT_TRIALS,
            default_tolerance: DEFAULT_TOLERANCE,
            max_dead_stones: DEFAULT_MAX_DEAD_STONES,
            default_komi: DEFAULT_KOMI,
            max_side: DEFAULT_MAX_SIDE,
        }
    }
}
