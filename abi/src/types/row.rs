use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{Error, FromRow, Row};

use crate::model::{Chat, Notification, User};

impl FromRow<'_, PgRow> for User {
    fn from_row(row: &'_ PgRow) -> Result<Self, Error> {
        let notifications: Json<Vec<Notification>> = row.try_get("notifications")?;
        let version: i64 = row.try_get("version")?;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            handle: row.try_get("handle")?,
            email: row.try_get("email")?,
            profile_pic: row.try_get("profile_pic")?,
            friends: row.try_get("friends")?,
            sent_friend_requests: row.try_get("sent_friend_requests")?,
            received_friend_requests: row.try_get("received_friend_requests")?,
            chats: row.try_get("chats")?,
            notifications: notifications.0,
            version: version as u64,
        })
    }
}

impl FromRow<'_, PgRow> for Chat {
    fn from_row(row: &'_ PgRow) -> Result<Self, Error> {
        let messages: Json<Vec<serde_json::Value>> = row.try_get("messages")?;
        let version: i64 = row.try_get("version")?;
        Ok(Self {
            id: row.try_get("id")?,
            group: row.try_get("is_group")?,
            members: row.try_get("members")?,
            admins: row.try_get("admins")?,
            messages: messages.0,
            last_interaction: row.try_get("last_interaction")?,
            version: version as u64,
        })
    }
}
