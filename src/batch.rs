use crate::config::EstimatorConfig;
use crate::error::EstimatorError;
use crate::estimator::InfluenceEstimator;
use crate::session::ScoreSession;
use crate::types::{BoardEstimate, BoardRequest, Color, ScoreEstimateRequest, ScoreEstimateResponse};

/// Scores every board in the request. Fails on the first malformed board.
pub fn estimate_batch(
    request: &ScoreEstimateRequest,
    config: &EstimatorConfig,
) -> Result<ScoreEstimateResponse, EstimatorError> {
    let results = request
        .boards
        .iter()
        .map(|board| estimate_board(board, config))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(boards = results.len(), "scored batch");
    Ok(ScoreEstimateResponse { results })
}

/// Scores one square board given as 1-based `"x,y"` stone lists.
pub fn estimate_board(
    request: &BoardRequest,
    config: &EstimatorConfig,
) -> Result<BoardEstimate, EstimatorError> {
    let size = i32::from(request.board_size);
    let estimator = Box::new(InfluenceEstimator::new(config));
    let mut session = ScoreSession::new(size, size, config.clone(), estimator)?;

    for stone in &request.black_stones {
        let (x, y) = parse_position(stone)?;
        session.set_stone(x.saturating_sub(1), y.saturating_sub(1), Color::Black.code().into());
    }
    for stone in &request.white_stones {
        let (x, y) = parse_position(stone)?;
        session.set_stone(x.saturating_sub(1), y.saturating_sub(1), Color::White.code().into());
    }

    let player = parse_player(request.next_to_move.as_deref());
    let params = session.params(
        player.code().into(),
        request.trials.unwrap_or(config.default_trials as i32),
        request.tolerance.unwrap_or(config.default_tolerance),
    );

    Ok(session.estimate(&params, request.komi.unwrap_or(config.default_komi)))
}

/// Parses `"x,y"`. Components may carry surrounding whitespace.
pub fn parse_position(pos: &str) -> Result<(i32, i32), EstimatorError> {
    let invalid = || EstimatorError::InvalidPosition(pos.to_string());

    let (x, y) = pos.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok((x, y))
}

/// `"white"`/`"w"` in any case is white; everything else, or nothing, is black.
pub fn parse_player(next_to_move: Option<&str>) -> Color {
    match next_to_move.map(str::to_ascii_lowercase).as_deref() {
        Some("white" | "w") => Color::White,
        _ => Color::Black,
    }
}
