//! Room lifecycle: create, join with capacity enforcement, status/member
//! polling, leave/dissolution, live results.
//!
//! Every operation is stateless and owns one transaction on the pool. Seat
//! accounting never reads a count and writes it back in a second statement;
//! it goes through single guarded UPDATEs checked by `rows_affected`, so
//! concurrent joins cannot push a room past capacity.

use anyhow::Result;
use serde::Serialize;
use sqlx::SqlitePool;

use super::store;

pub const MAX_USER_COUNT: i64 = 4;

/// Integer-encoded enums shared with the client protocol and the store.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(into = "i64", try_from = "i64")]
        pub enum $name {
            $($variant = $value),+
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> i64 {
                value as i64
            }
        }

        impl TryFrom<i64> for $name {
            type Error = anyhow::Error;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    other => Err(anyhow::anyhow!(concat!(stringify!($name), " out of range: {}"), other)),
                }
            }
        }
    };
}

wire_enum!(LiveDifficulty {
    Normal = 1,
    Hard = 2,
});

wire_enum!(
    /// Business outcome of a join attempt. Operational failures are not in
    /// here; they come back as `Err` from [`join_room`].
    JoinRoomResult {
        Ok = 1,
        RoomFull = 2,
        Disbanded = 3,
        OtherError = 4,
    }
);

wire_enum!(WaitRoomStatus {
    Waiting = 1,
    LiveStart = 2,
    Dissolution = 3,
});

#[derive(Debug, Clone, Serialize)]
pub struct RoomInfo {
    pub room_id: i64,
    pub live_id: i64,
    pub joined_user_count: i64,
    pub max_user_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomStatus {
    pub room_id: i64,
    pub status: WaitRoomStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomUser {
    pub room_id: i64,
    pub user_id: i64,
    pub live_difficulty: LiveDifficulty,
    pub is_me: bool,
    pub is_host: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultUser {
    pub user_id: i64,
    pub judge_count_list: Vec<i64>,
    pub score: i64,
}

/// Inserts a fresh Waiting room with nobody in it and returns its id.
pub async fn create_room(pool: &SqlitePool, live_id: i64) -> Result<i64> {
    let mut tx = pool.begin().await?;
    let room_id = store::insert_room(&mut tx, live_id).await?;
    tx.commit().await?;

    tracing::info!(room_id, live_id, "room created");
    Ok(room_id)
}

/// Takes a seat in the room, or explains why not.
///
/// Write-first: one guarded UPDATE claims the seat, and only a missed claim
/// falls back to reading the room to tell Disbanded from RoomFull. A
/// duplicate join rolls the claimed seat back and reports OtherError.
pub async fn join_room(
    pool: &SqlitePool,
    user_id: i64,
    room_id: i64,
    live_difficulty: LiveDifficulty,
    is_host: bool,
) -> Result<JoinRoomResult> {
    let mut tx = pool.begin().await?;

    if !store::claim_seat(&mut tx, room_id, MAX_USER_COUNT).await? {
        let room = store::select_room(&mut tx, room_id).await?;
        tx.rollback().await?;

        let Some((joined_user_count, status)) = room else {
            return Ok(JoinRoomResult::Disbanded);
        };
        if WaitRoomStatus::try_from(status)? != WaitRoomStatus::Waiting {
            return Ok(JoinRoomResult::Disbanded);
        }
        if joined_user_count >= MAX_USER_COUNT {
            return Ok(JoinRoomResult::RoomFull);
        }
        tracing::warn!(room_id, user_id, joined_user_count, "seat claim missed on a joinable room");
        return Ok(JoinRoomResult::OtherError);
    }

    if !store::insert_member(&mut tx, room_id, user_id, live_difficulty, is_host).await? {
        // already a member; the rollback hands the claimed seat back
        tx.rollback().await?;
        tracing::warn!(room_id, user_id, "duplicate join attempt");
        return Ok(JoinRoomResult::OtherError);
    }

    tx.commit().await?;
    tracing::info!(room_id, user_id, is_host, "user joined room");
    Ok(JoinRoomResult::Ok)
}

/// All rooms for a song, in creation order. No rooms is an empty list, not
/// an error.
pub async fn list_rooms(pool: &SqlitePool, live_id: i64) -> Result<Vec<RoomInfo>> {
    let mut tx = pool.begin().await?;
    let rows = store::select_rooms_by_live_id(&mut tx, live_id).await?;
    tx.commit().await?;

    Ok(rows
        .into_iter()
        .map(|(room_id, live_id, joined_user_count)| RoomInfo {
            room_id,
            live_id,
            joined_user_count,
            max_user_count: MAX_USER_COUNT,
        })
        .collect())
}

/// `None` when the room row no longer exists. Unlike join, this does not
/// pretend to know why; the API layer turns it into a 404.
pub async fn get_room_status(pool: &SqlitePool, room_id: i64) -> Result<Option<RoomStatus>> {
    let mut tx = pool.begin().await?;
    let status = store::select_status(&mut tx, room_id).await?;
    tx.commit().await?;

    match status {
        Some(status) => Ok(Some(RoomStatus {
            room_id,
            status: WaitRoomStatus::try_from(status)?,
        })),
        None => Ok(None),
    }
}

/// Members of the room ordered by user id, with `is_me` set on the row that
/// belongs to the requesting user. `is_me` is never persisted.
pub async fn get_room_users(
    pool: &SqlitePool,
    room_id: i64,
    requesting_user_id: i64,
) -> Result<Vec<RoomUser>> {
    let mut tx = pool.begin().await?;
    let rows = store::select_members(&mut tx, room_id).await?;
    tx.commit().await?;

    rows.into_iter()
        .map(|(user_id, live_difficulty, is_host)| {
            Ok(RoomUser {
                room_id,
                user_id,
                live_difficulty: LiveDifficulty::try_from(live_difficulty)?,
                is_me: user_id == requesting_user_id,
                is_host,
            })
        })
        .collect()
}

/// Drops the caller out of the room. The seat comes back through the same
/// guarded-UPDATE shape the join uses. The host leaving dissolves the room
/// for everyone still in it; the last member leaving destroys the row.
/// Leaving a room you are not in does nothing.
pub async fn leave_room(pool: &SqlitePool, user_id: i64, room_id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    let Some(was_host) = store::delete_member(&mut tx, room_id, user_id).await? else {
        tx.rollback().await?;
        return Ok(());
    };

    match store::release_seat(&mut tx, room_id).await? {
        Some(0) => {
            store::delete_room(&mut tx, room_id).await?;
            tracing::info!(room_id, user_id, "last member left, room destroyed");
        }
        Some(_) if was_host => {
            store::set_status(&mut tx, room_id, WaitRoomStatus::Dissolution).await?;
            tracing::info!(room_id, user_id, "host left, room dissolved");
        }
        Some(remaining) => {
            tracing::info!(room_id, user_id, remaining, "user left room");
        }
        None => {
            tracing::warn!(room_id, user_id, "member row existed without a room row");
        }
    }

    tx.commit().await?;
    Ok(())
}

/// Waiting -> LiveStart, only for the host and only once. Returns whether
/// the transition happened; a no-op is not an error.
pub async fn start_live(pool: &SqlitePool, user_id: i64, room_id: i64) -> Result<bool> {
    let mut tx = pool.begin().await?;
    let started = store::start_live(&mut tx, room_id, user_id).await?;
    tx.commit().await?;

    if started {
        tracing::info!(room_id, user_id, "live started");
    } else {
        tracing::debug!(room_id, user_id, "start ignored: not host, or room not waiting");
    }
    Ok(started)
}

/// Records the caller's play result on their membership row.
pub async fn store_result(
    pool: &SqlitePool,
    user_id: i64,
    room_id: i64,
    score: i64,
    judge_count_list: &[i64],
) -> Result<()> {
    let judges = serde_json::to_string(judge_count_list)?;

    let mut tx = pool.begin().await?;
    let stored = store::store_result(&mut tx, room_id, user_id, score, &judges).await?;
    tx.commit().await?;

    if stored {
        tracing::info!(room_id, user_id, score, "result posted");
    } else {
        tracing::warn!(room_id, user_id, "result posted by a non-member");
    }
    Ok(())
}

/// The scoreboard, or an empty list while anyone is still playing. Clients
/// poll this until everybody's result is in.
pub async fn get_room_results(pool: &SqlitePool, room_id: i64) -> Result<Vec<ResultUser>> {
    let mut tx = pool.begin().await?;
    let rows = store::select_results(&mut tx, room_id).await?;
    tx.commit().await?;

    let mut results = Vec::with_capacity(rows.len());
    for (user_id, score, judges) in rows {
        let (Some(score), Some(judges)) = (score, judges) else {
            return Ok(Vec::new());
        };
        results.push(ResultUser {
            user_id,
            judge_count_list: serde_json::from_str(&judges)?,
            score,
        });
    }
    Ok(results)
}
