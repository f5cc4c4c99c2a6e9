use serde::{Deserialize, Serialize};

use super::{set_insert, set_remove, ChatId, Notification, UserId};

/// The relationship-relevant part of an account. Registration and credentials live elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub handle: String,
    pub email: String,
    #[serde(default)]
    pub profile_pic: bool,
    #[serde(default)]
    pub friends: Vec<UserId>,
    #[serde(default)]
    pub sent_friend_requests: Vec<UserId>,
    #[serde(default)]
    pub received_friend_requests: Vec<UserId>,
    #[serde(default)]
    pub chats: Vec<ChatId>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    /// optimistic concurrency token, 0 means never stored
    #[serde(default)]
    pub version: u64,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        handle: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            handle: handle.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn is_friend(&self, other: &str) -> bool {
        self.friends.iter().any(|id| id == other)
    }

    pub fn has_sent_to(&self, other: &str) -> bool {
        self.sent_friend_requests.iter().any(|id| id == other)
    }

    pub fn has_received_from(&self, other: &str) -> bool {
        self.received_friend_requests.iter().any(|id| id == other)
    }

    pub fn record_sent_request(&mut self, to: &str) -> bool {
        set_insert(&mut self.sent_friend_requests, to)
    }

    pub fn record_received_request(&mut self, from: &str) -> bool {
        set_insert(&mut self.received_friend_requests, from)
    }

    /// Friendship supersedes any pending request in either direction.
    pub fn befriend(&mut self, other: &str) {
        set_remove(&mut self.sent_friend_requests, other);
        set_remove(&mut self.received_friend_requests, other);
        set_insert(&mut self.friends, other);
    }

    pub fn join_chat(&mut self, chat_id: &str) -> bool {
        set_insert(&mut self.chats, chat_id)
    }

    pub fn remove_notification(&mut self, notification_id: &str) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != notification_id);
        before != self.notifications.len()
    }
}
