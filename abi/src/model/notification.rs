use serde::{Deserialize, Serialize};

use super::{NotificationId, UserId};

/// Produced by feed/comment events elsewhere; this service only lists and deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: String,
    /// id of the entity the notification points at, e.g. a drop or a user
    #[serde(default)]
    pub payload: Option<String>,
    pub user_id: UserId,
    pub created_at: i64,
}
