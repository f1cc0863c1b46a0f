use axum::{debug_handler, extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{auth::AuthUser, ApiError, ApiResult, AppState};

use super::model::{self, RoomUser, WaitRoomStatus};

#[derive(Deserialize)]
pub(crate) struct RoomWaitRequest {
    room_id: i64,
}

#[derive(Serialize)]
pub(crate) struct RoomWaitResponse {
    status: WaitRoomStatus,
    room_user_list: Vec<RoomUser>,
}

/// Polled by everyone in the room until the status flips.
#[debug_handler(state = AppState)]
pub(crate) async fn wait(
    State(db_pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(RoomWaitRequest { room_id }): Json<RoomWaitRequest>,
) -> ApiResult<Json<RoomWaitResponse>> {
    let Some(room_status) = model::get_room_status(&db_pool, room_id).await? else {
        return Err(ApiError::NotFound("room"));
    };
    let room_user_list = model::get_room_users(&db_pool, room_id, user.id).await?;

    Ok(Json(RoomWaitResponse {
        status: room_status.status,
        room_user_list,
    }))
}
