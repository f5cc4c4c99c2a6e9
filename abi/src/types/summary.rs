use serde::{Deserialize, Serialize};

use crate::model::{Chat, Notification, User};

/// Public view of a user, safe to hand to anybody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub profile_pic: bool,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            handle: user.handle.clone(),
            profile_pic: user.profile_pic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: String,
    pub members: Vec<UserSummary>,
    pub group: bool,
    pub last_interaction: i64,
}

impl ChatSummary {
    /// Members are resolved from `users` in the chat's stored order; unknown ids are skipped.
    pub fn project(chat: &Chat, users: &[User]) -> Self {
        let members = chat
            .members
            .iter()
            .filter_map(|id| users.iter().find(|user| &user.id == id))
            .map(UserSummary::from)
            .collect();
        Self {
            id: chat.id.clone(),
            members,
            group: chat.group,
            last_interaction: chat.last_interaction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSummary {
    pub id: String,
    pub kind: String,
    pub payload: Option<String>,
    pub created_at: i64,
}

impl From<&Notification> for NotificationSummary {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.clone(),
            kind: notification.kind.clone(),
            payload: notification.payload.clone(),
            created_at: notification.created_at,
        }
    }
}

/// What a signed-in user sees about themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfSummary {
    #[serde(flatten)]
    pub user: UserSummary,
    pub email: String,
    pub friends: Vec<UserSummary>,
    pub sent_friend_requests: Vec<UserSummary>,
    pub received_friend_requests: Vec<UserSummary>,
    pub chats: Vec<ChatSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_summary_hides_private_fields() {
        let mut user = User::new("a", "Ada", "@ada", "ada@example.com");
        user.profile_pic = true;
        user.friends.push("b".into());
        let summary = UserSummary::from(&user);
        assert_eq!(
            summary,
            UserSummary {
                id: "a".into(),
                name: "Ada".into(),
                handle: "@ada".into(),
                profile_pic: true,
            }
        );
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("email").is_none());
    }

    #[test]
    fn chat_projection_follows_member_order_and_skips_unknown() {
        let a = User::new("a", "A", "@a", "a@example.com");
        let b = User::new("b", "B", "@b", "b@example.com");
        let mut chat = Chat::pairwise("b", "a", 7);
        chat.members.push("ghost".into());

        let summary = ChatSummary::project(&chat, &[a, b]);
        let ids: Vec<_> = summary.members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(summary.last_interaction, 7);
        assert!(!summary.group);
    }
}
