use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{auth::AuthUser, ApiResult, AppState, Empty};

use super::model;

#[derive(Deserialize)]
pub(crate) struct RoomLeaveRequest {
    room_id: i64,
}

#[debug_handler(state = AppState)]
pub(crate) async fn leave(
    State(db_pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(RoomLeaveRequest { room_id }): Json<RoomLeaveRequest>,
) -> ApiResult<Json<Empty>> {
    model::leave_room(&db_pool, user.id, room_id).await?;
    Ok(Json(Empty {}))
}
