use axum::{debug_handler, extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{auth::AuthUser, ApiResult, AppState, Empty};

use super::model::{self, ResultUser};

#[derive(Deserialize)]
pub(crate) struct RoomStartRequest {
    room_id: i64,
}

/// Flips the room to LiveStart. Only the host can do this; anyone else
/// polling /room/wait picks the new status up on their next request.
#[debug_handler(state = AppState)]
pub(crate) async fn start(
    State(db_pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(RoomStartRequest { room_id }): Json<RoomStartRequest>,
) -> ApiResult<Json<Empty>> {
    model::start_live(&db_pool, user.id, room_id).await?;
    Ok(Json(Empty {}))
}

#[derive(Deserialize)]
pub(crate) struct RoomEndRequest {
    room_id: i64,
    judge_count_list: Vec<i64>,
    score: i64,
}

#[debug_handler(state = AppState)]
pub(crate) async fn end(
    State(db_pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(RoomEndRequest {
        room_id,
        judge_count_list,
        score,
    }): Json<RoomEndRequest>,
) -> ApiResult<Json<Empty>> {
    model::store_result(&db_pool, user.id, room_id, score, &judge_count_list).await?;
    Ok(Json(Empty {}))
}

#[derive(Deserialize)]
pub(crate) struct RoomResultRequest {
    room_id: i64,
}

#[derive(Serialize)]
pub(crate) struct RoomResultResponse {
    result_user_list: Vec<ResultUser>,
}

/// Empty list means "not everyone has finished yet"; clients keep polling.
#[debug_handler]
pub(crate) async fn result(
    State(db_pool): State<SqlitePool>,
    Json(RoomResultRequest { room_id }): Json<RoomResultRequest>,
) -> ApiResult<Json<RoomResultResponse>> {
    let result_user_list = model::get_room_results(&db_pool, room_id).await?;
    Ok(Json(RoomResultResponse { result_user_list }))
}
