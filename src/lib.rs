use wasm_bindgen::prelude::*;

pub mod batch;
pub mod bindings;
pub mod board;
pub mod config;
pub mod error;
pub mod estimator;
pub mod handles;
pub mod session;
pub mod types;

pub use board::Board;
pub use config::EstimatorConfig;
pub use error::EstimatorError;
pub use estimator::{InfluenceEstimator, ScoreEstimator};
pub use session::ScoreSession;
pub use types::{BoardDims, Color, EstimateParams, Point};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
