use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};

use super::AppState;
use crate::reports;
use crate::views;

// GET / - Player picker
pub async fn index(State(data): State<AppState>) -> Html<String> {
    // An empty list still renders; the page says there is nothing to show.
    let players = reports::player_list(&data).unwrap_or_default();
    Html(views::index_page(&players))
}

// GET /player/:id - Summary stats, ranks and game log
pub async fn player_page(
    State(data): State<AppState>,
    Path(player_id): Path<i64>,
) -> (StatusCode, Html<String>) {
    match reports::player_detail(&data, player_id) {
        Ok(detail) => (StatusCode::OK, Html(views::player_page(&detail))),
        Err(e) => {
            tracing::debug!("Player page {} failed: {}", player_id, e.message());
            (e.status(), Html(views::error_page(e.message())))
        }
    }
}
