pub mod auth;
pub mod db;
pub mod rooms;
pub mod users;

use axum::{extract::FromRef, http::StatusCode, response::{IntoResponse, Response}, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/user", users::router())
        .nest("/room", rooms::router())
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// The `{}` acknowledgement body the client protocol uses for update,
/// start, end and leave.
#[derive(Serialize)]
pub struct Empty {}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    NotFound(&'static str),
    Unauthorized(&'static str),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            Self::Unauthorized(why) => (StatusCode::UNAUTHORIZED, why.to_owned()),
            Self::Internal(err) => {
                // operational failures are reported here, never folded into
                // a business outcome the client might mistake for its own
                tracing::error!(error = ?err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
