use axum::{
    extract::{Path, State},
    response::Json,
};

use super::AppState;
use crate::error::ApiError;
use crate::models::{GameStatsResponse, PlayerListItem};
use crate::reports;

// GET /api/players - List all players sorted by name
pub async fn get_players(
    State(data): State<AppState>,
) -> Result<Json<Vec<PlayerListItem>>, ApiError> {
    let players = reports::player_list(&data).inspect_err(|e| {
        tracing::debug!("Player list unavailable: {}", e.message());
    })?;

    Ok(Json(players))
}

// GET /api/player/:id/game_stats - Per-game series for the player charts
pub async fn get_player_game_stats(
    State(data): State<AppState>,
    Path(player_id): Path<i64>,
) -> Result<Json<GameStatsResponse>, ApiError> {
    let stats = reports::game_stats(&data, player_id).inspect_err(|e| {
        tracing::debug!("Game stats for player {} failed: {}", player_id, e.message());
    })?;

    Ok(Json(stats))
}
