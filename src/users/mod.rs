use axum::{
    debug_handler,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{auth::AuthUser, ApiResult, AppState, Empty};

pub mod model;

use model::SafeUser;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/me", get(me))
        .route("/update", post(update))
}

#[derive(Deserialize)]
pub(crate) struct UserRequest {
    user_name: String,
    leader_card_id: i64,
}

#[derive(Serialize)]
pub(crate) struct UserCreateResponse {
    user_token: String,
}

#[debug_handler]
pub(crate) async fn create(
    State(db_pool): State<SqlitePool>,
    Json(UserRequest {
        user_name,
        leader_card_id,
    }): Json<UserRequest>,
) -> ApiResult<Json<UserCreateResponse>> {
    let user_token = model::create_user(&db_pool, &user_name, leader_card_id).await?;
    Ok(Json(UserCreateResponse { user_token }))
}

#[debug_handler(state = AppState)]
pub(crate) async fn me(AuthUser(user): AuthUser) -> Json<SafeUser> {
    Json(user)
}

#[debug_handler(state = AppState)]
pub(crate) async fn update(
    State(db_pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(UserRequest {
        user_name,
        leader_card_id,
    }): Json<UserRequest>,
) -> ApiResult<Json<Empty>> {
    model::update_user(&db_pool, user.id, &user_name, leader_card_id).await?;
    Ok(Json(Empty {}))
}
