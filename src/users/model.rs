use anyhow::Result;
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// User row without the token, safe to hand back to clients.
#[derive(Debug, Clone, Serialize)]
pub struct SafeUser {
    pub id: i64,
    pub name: String,
    pub leader_card_id: i64,
}

/// Registers a new user and returns the bearer token that identifies them
/// from now on.
pub async fn create_user(db_pool: &SqlitePool, name: &str, leader_card_id: i64) -> Result<String> {
    let token = Uuid::now_v7().to_string();
    sqlx::query("INSERT INTO user (name, token, leader_card_id) VALUES (?, ?, ?)")
        .bind(name)
        .bind(&token)
        .bind(leader_card_id)
        .execute(db_pool)
        .await?;

    Ok(token)
}

pub async fn get_user_by_token(db_pool: &SqlitePool, token: &str) -> Result<Option<SafeUser>> {
    let row: Option<(i64, String, i64)> =
        sqlx::query_as("SELECT id, name, leader_card_id FROM user WHERE token = ?")
            .bind(token)
            .fetch_optional(db_pool)
            .await?;

    Ok(row.map(|(id, name, leader_card_id)| SafeUser {
        id,
        name,
        leader_card_id,
    }))
}

pub async fn update_user(
    db_pool: &SqlitePool,
    user_id: i64,
    name: &str,
    leader_card_id: i64,
) -> Result<()> {
    sqlx::query("UPDATE user SET name = ?, leader_card_id = ? WHERE id = ?")
        .bind(name)
        .bind(leader_card_id)
        .bind(user_id)
        .execute(db_pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn test_pool() -> SqlitePool {
        db::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn token_resolves_to_the_created_user() {
        let pool = test_pool().await;

        let token = create_user(&pool, "saki", 42).await.unwrap();
        let user = get_user_by_token(&pool, &token).await.unwrap().unwrap();

        assert_eq!(user.name, "saki");
        assert_eq!(user.leader_card_id, 42);
    }

    #[tokio::test]
    async fn unknown_token_resolves_to_nothing() {
        let pool = test_pool().await;

        assert!(get_user_by_token(&pool, "not-a-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_changes_name_and_leader_card() {
        let pool = test_pool().await;

        let token = create_user(&pool, "saki", 42).await.unwrap();
        let user = get_user_by_token(&pool, &token).await.unwrap().unwrap();

        update_user(&pool, user.id, "honami", 7).await.unwrap();

        let user = get_user_by_token(&pool, &token).await.unwrap().unwrap();
        assert_eq!(user.name, "honami");
        assert_eq!(user.leader_card_id, 7);
    }
}
