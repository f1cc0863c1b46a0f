use axum::{debug_handler, extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::ApiResult;

use super::model::{self, RoomInfo};

#[derive(Deserialize)]
pub(crate) struct RoomListRequest {
    live_id: i64,
}

#[derive(Serialize)]
pub(crate) struct RoomListResponse {
    room_info_list: Vec<RoomInfo>,
}

#[debug_handler]
pub(crate) async fn list(
    State(db_pool): State<SqlitePool>,
    Json(RoomListRequest { live_id }): Json<RoomListRequest>,
) -> ApiResult<Json<RoomListResponse>> {
    let room_info_list = model::list_rooms(&db_pool, live_id).await?;
    Ok(Json(RoomListResponse { room_info_list }))
}
