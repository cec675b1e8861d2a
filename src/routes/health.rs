use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: i64,
    players: usize,
    games: usize,
}

// GET /health - Liveness plus loaded table sizes
pub async fn health_check(State(data): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        players: data.summary.rows.len(),
        games: data.games.len(),
    };

    (StatusCode::OK, Json(response))
}
