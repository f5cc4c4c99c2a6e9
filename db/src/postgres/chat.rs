use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgConnection;

use abi::errors::{Error, Result};
use abi::model::{Chat, ChatId};

use super::PostgresStore;
use crate::chat::ChatRepo;

pub(super) async fn write_chat(conn: &mut PgConnection, chat: &Chat) -> Result<()> {
    let result = if chat.version == 0 {
        sqlx::query(
            "INSERT INTO chats
            (id, is_group, members, admins, messages, last_interaction, version)
            VALUES ($1, $2, $3, $4, $5, $6, 1)
            ON CONFLICT (id) DO NOTHING",
        )
        .bind(&chat.id)
        .bind(chat.group)
        .bind(&chat.members)
        .bind(&chat.admins)
        .bind(Json(&chat.messages))
        .bind(chat.last_interaction)
        .execute(&mut *conn)
        .await?
    } else {
        sqlx::query(
            "UPDATE chats
            SET is_group = $2,
                members = $3,
                admins = $4,
                messages = $5,
                last_interaction = $6,
                version = version + 1
            WHERE id = $1 AND version = $7",
        )
        .bind(&chat.id)
        .bind(chat.group)
        .bind(&chat.members)
        .bind(&chat.admins)
        .bind(Json(&chat.messages))
        .bind(chat.last_interaction)
        .bind(chat.version as i64)
        .execute(&mut *conn)
        .await?
    };

    if result.rows_affected() == 0 {
        return Err(Error::conflict(format!(
            "chat {} changed since version {}",
            chat.id, chat.version
        )));
    }
    Ok(())
}

#[async_trait]
impl ChatRepo for PostgresStore {
    async fn find_chats_by_ids(&self, ids: &[ChatId]) -> Result<Vec<Chat>> {
        let chats: Vec<Chat> = sqlx::query_as("SELECT * FROM chats WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids
            .iter()
            .filter_map(|id| chats.iter().find(|chat| &chat.id == id))
            .cloned()
            .collect())
    }

    async fn save_chat(&self, mut chat: Chat) -> Result<Chat> {
        let mut transaction = self.pool.begin().await?;
        write_chat(&mut *transaction, &chat).await?;
        transaction.commit().await?;
        chat.version += 1;
        Ok(chat)
    }
}
