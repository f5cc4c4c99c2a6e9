use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgConnection;

use abi::errors::{Error, Result};
use abi::model::{User, UserId};

use super::PostgresStore;
use crate::user::UserRepo;

/// Inserts a new user (version 0) or updates one guarded by its version.
pub(super) async fn write_user(conn: &mut PgConnection, user: &User) -> Result<()> {
    let result = if user.version == 0 {
        sqlx::query(
            "INSERT INTO users
            (id, name, handle, email, profile_pic, friends, sent_friend_requests,
             received_friend_requests, chats, notifications, version)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 1)
            ON CONFLICT (id) DO NOTHING",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.handle)
        .bind(&user.email)
        .bind(user.profile_pic)
        .bind(&user.friends)
        .bind(&user.sent_friend_requests)
        .bind(&user.received_friend_requests)
        .bind(&user.chats)
        .bind(Json(&user.notifications))
        .execute(&mut *conn)
        .await?
    } else {
        sqlx::query(
            "UPDATE users
            SET name = $2,
                handle = $3,
                email = $4,
                profile_pic = $5,
                friends = $6,
                sent_friend_requests = $7,
                received_friend_requests = $8,
                chats = $9,
                notifications = $10,
                version = version + 1
            WHERE id = $1 AND version = $11",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.handle)
        .bind(&user.email)
        .bind(user.profile_pic)
        .bind(&user.friends)
        .bind(&user.sent_friend_requests)
        .bind(&user.received_friend_requests)
        .bind(&user.chats)
        .bind(Json(&user.notifications))
        .bind(user.version as i64)
        .execute(&mut *conn)
        .await?
    };

    if result.rows_affected() == 0 {
        return Err(Error::conflict(format!(
            "user {} changed since version {}",
            user.id, user.version
        )));
    }
    Ok(())
}

#[async_trait]
impl UserRepo for PostgresStore {
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_handle_or_email(&self, key: &str) -> Result<Option<User>> {
        let user = sqlx::query_as(
            "SELECT * FROM users WHERE handle = $1 OR lower(email) = lower($1) ORDER BY id LIMIT 1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>> {
        let users: Vec<User> = sqlx::query_as("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        // ANY does not keep the order of the array
        Ok(ids
            .iter()
            .filter_map(|id| users.iter().find(|user| &user.id == id))
            .cloned()
            .collect())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn save_user(&self, mut user: User) -> Result<User> {
        let mut transaction = self.pool.begin().await?;
        write_user(&mut *transaction, &user).await?;
        transaction.commit().await?;
        user.version += 1;
        Ok(user)
    }
}
