use tracing::debug;

use abi::errors::Result;
use abi::model::Notification;
use abi::types::{DeleteOutcome, NotificationSummary};

use crate::RelationService;

/// Snapshot of a user's notifications. Summaries are projected lazily while iterating,
/// and the feed can be walked as often as needed.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl NotificationFeed {
    pub fn iter(&self) -> impl Iterator<Item = NotificationSummary> + '_ {
        self.items.iter().map(NotificationSummary::from)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl RelationService {
    /// Removes one notification. Deleting an id that is not there is still a success.
    pub async fn delete_notification(
        &self,
        user_id: &str,
        notification_id: &str,
    ) -> Result<DeleteOutcome> {
        self.retrying("delete_notification", move || async move {
            let mut user = self.find_user(user_id).await?;
            if user.remove_notification(notification_id) {
                self.guarded(self.db.user.save_user(user)).await?;
                debug!("notification {notification_id} of {user_id} deleted");
            } else {
                debug!("notification {notification_id} of {user_id} already gone");
            }
            Ok(DeleteOutcome { ok: true })
        })
        .await
    }

    /// The user's notifications in stored order.
    pub async fn list_notifications(&self, user_id: &str) -> Result<NotificationFeed> {
        let user = self.find_user(user_id).await?;
        Ok(NotificationFeed {
            items: user.notifications,
        })
    }
}
