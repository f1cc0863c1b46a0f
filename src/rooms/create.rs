use axum::{debug_handler, extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{auth::AuthUser, ApiResult, AppState};

use super::model::{self, LiveDifficulty};

#[derive(Deserialize)]
pub(crate) struct RoomCreateRequest {
    live_id: i64,
    select_difficulty: LiveDifficulty,
}

#[derive(Serialize)]
pub(crate) struct RoomCreateResponse {
    room_id: i64,
}

#[debug_handler(state = AppState)]
pub(crate) async fn create(
    State(db_pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(RoomCreateRequest { live_id, select_difficulty }): Json<RoomCreateRequest>,
) -> ApiResult<Json<RoomCreateResponse>> {
    let room_id = model::create_room(&db_pool, live_id).await?;
    // the creator takes the host seat straight away
    model::join_room(&db_pool, user.id, room_id, select_difficulty, true).await?;

    Ok(Json(RoomCreateResponse { room_id }))
}
