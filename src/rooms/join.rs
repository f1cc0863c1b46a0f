use axum::{debug_handler, extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{auth::AuthUser, ApiResult, AppState};

use super::model::{self, JoinRoomResult, LiveDifficulty};

#[derive(Deserialize)]
pub(crate) struct RoomJoinRequest {
    room_id: i64,
    select_difficulty: LiveDifficulty,
}

#[derive(Serialize)]
pub(crate) struct RoomJoinResponse {
    join_room_result: JoinRoomResult,
}

#[debug_handler(state = AppState)]
pub(crate) async fn join(
    State(db_pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(RoomJoinRequest { room_id, select_difficulty }): Json<RoomJoinRequest>,
) -> ApiResult<Json<RoomJoinResponse>> {
    let join_room_result =
        model::join_room(&db_pool, user.id, room_id, select_difficulty, false).await?;
    Ok(Json(RoomJoinResponse { join_room_result }))
}
