use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// A reference table failed to load or is empty.
    DataUnavailable,
    PlayerNotFound,
}

impl ApiError {
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::DataUnavailable => "Data not available",
            ApiError::PlayerNotFound => "Player not found",
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message(),
        });

        (self.status(), body).into_response()
    }
}
