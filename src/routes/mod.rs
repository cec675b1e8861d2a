use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::Dataset;

pub mod health;
pub mod pages;
pub mod players;

/// Shared, read-only application state.
pub type AppState = Arc<Dataset>;

pub fn build_router(data: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route("/", get(pages::index))
        .route("/player/{player_id}", get(pages::player_page))
        .route("/health", get(health::health_check))

        // Chart and listing API
        .route("/api/players", get(players::get_players))
        .route("/api/player/{player_id}/game_stats", get(players::get_player_game_stats))

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(data)
}
