//! Persistence gateway for the two room tables. Row-level statements only;
//! the model layer owns the transaction these run inside.

use sqlx::SqliteConnection;

use super::model::{LiveDifficulty, WaitRoomStatus};

pub(crate) async fn insert_room(conn: &mut SqliteConnection, live_id: i64) -> sqlx::Result<i64> {
    let result = sqlx::query("INSERT INTO room (live_id, joined_user_count, status) VALUES (?, 0, ?)")
        .bind(live_id)
        .bind(WaitRoomStatus::Waiting as i64)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}

/// One guarded statement takes the seat. `false` means the guard refused
/// (room missing, full, or no longer waiting); the caller reads the room
/// to tell which.
pub(crate) async fn claim_seat(
    conn: &mut SqliteConnection,
    room_id: i64,
    max_user_count: i64,
) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "UPDATE room SET joined_user_count = joined_user_count + 1 \
         WHERE room_id=? AND joined_user_count < ? AND status=?",
    )
    .bind(room_id)
    .bind(max_user_count)
    .bind(WaitRoomStatus::Waiting as i64)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// `false` when the (room_id, user_id) row already exists.
pub(crate) async fn insert_member(
    conn: &mut SqliteConnection,
    room_id: i64,
    user_id: i64,
    live_difficulty: LiveDifficulty,
    is_host: bool,
) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO room_user (room_id, user_id, live_difficulty, is_host) \
         VALUES (?, ?, ?, ?)",
    )
    .bind(room_id)
    .bind(user_id)
    .bind(live_difficulty as i64)
    .bind(is_host)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub(crate) async fn select_room(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> sqlx::Result<Option<(i64, i64)>> {
    sqlx::query_as("SELECT joined_user_count, status FROM room WHERE room_id=?")
        .bind(room_id)
        .fetch_optional(&mut *conn)
        .await
}

pub(crate) async fn select_rooms_by_live_id(
    conn: &mut SqliteConnection,
    live_id: i64,
) -> sqlx::Result<Vec<(i64, i64, i64)>> {
    sqlx::query_as(
        "SELECT room_id, live_id, joined_user_count FROM room WHERE live_id=? ORDER BY room_id",
    )
    .bind(live_id)
    .fetch_all(&mut *conn)
    .await
}

pub(crate) async fn select_status(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> sqlx::Result<Option<i64>> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT status FROM room WHERE room_id=?")
        .bind(room_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(|(status,)| status))
}

pub(crate) async fn select_members(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> sqlx::Result<Vec<(i64, i64, bool)>> {
    sqlx::query_as(
        "SELECT user_id, live_difficulty, is_host FROM room_user WHERE room_id=? ORDER BY user_id",
    )
    .bind(room_id)
    .fetch_all(&mut *conn)
    .await
}

/// Removes the membership row and reports whether it was the host's.
/// `None`: the user was not in the room.
pub(crate) async fn delete_member(
    conn: &mut SqliteConnection,
    room_id: i64,
    user_id: i64,
) -> sqlx::Result<Option<bool>> {
    let row: Option<(bool,)> =
        sqlx::query_as("DELETE FROM room_user WHERE room_id=? AND user_id=? RETURNING is_host")
            .bind(room_id)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(row.map(|(is_host,)| is_host))
}

/// Guarded decrement; returns the remaining count, or `None` when there is
/// no room row with a seat to give back.
pub(crate) async fn release_seat(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> sqlx::Result<Option<i64>> {
    let row: Option<(i64,)> = sqlx::query_as(
        "UPDATE room SET joined_user_count = joined_user_count - 1 \
         WHERE room_id=? AND joined_user_count > 0 RETURNING joined_user_count",
    )
    .bind(room_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row.map(|(count,)| count))
}

pub(crate) async fn delete_room(conn: &mut SqliteConnection, room_id: i64) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM room WHERE room_id=?")
        .bind(room_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub(crate) async fn set_status(
    conn: &mut SqliteConnection,
    room_id: i64,
    status: WaitRoomStatus,
) -> sqlx::Result<()> {
    sqlx::query("UPDATE room SET status=? WHERE room_id=?")
        .bind(status as i64)
        .bind(room_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Waiting -> LiveStart, conditional on the caller holding the host seat.
pub(crate) async fn start_live(
    conn: &mut SqliteConnection,
    room_id: i64,
    host_user_id: i64,
) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "UPDATE room SET status=? WHERE room_id=? AND status=? \
         AND EXISTS (SELECT 1 FROM room_user WHERE room_id=? AND user_id=? AND is_host=1)",
    )
    .bind(WaitRoomStatus::LiveStart as i64)
    .bind(room_id)
    .bind(WaitRoomStatus::Waiting as i64)
    .bind(room_id)
    .bind(host_user_id)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// `false` when the caller has no membership row to write the result on.
pub(crate) async fn store_result(
    conn: &mut SqliteConnection,
    room_id: i64,
    user_id: i64,
    score: i64,
    judge_count_list: &str,
) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "UPDATE room_user SET score=?, judge_count_list=? WHERE room_id=? AND user_id=?",
    )
    .bind(score)
    .bind(judge_count_list)
    .bind(room_id)
    .bind(user_id)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub(crate) async fn select_results(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> sqlx::Result<Vec<(i64, Option<i64>, Option<String>)>> {
    sqlx::query_as(
        "SELECT user_id, score, judge_count_list FROM room_user WHERE room_id=? ORDER BY user_id",
    )
    .bind(room_id)
    .fetch_all(&mut *conn)
    .await
}
