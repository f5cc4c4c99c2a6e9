use serde::{Deserialize, Serialize};

use super::{ChatSummary, UserSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FriendRequestStatus {
    /// request recorded, waiting for the target
    Pending,
    /// both sides asked for each other, friendship established
    Mutual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOutcome {
    pub status: FriendRequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatSummary>,
}

impl SendOutcome {
    pub fn pending() -> Self {
        Self {
            status: FriendRequestStatus::Pending,
            chat: None,
        }
    }

    pub fn mutual(chat: ChatSummary) -> Self {
        Self {
            status: FriendRequestStatus::Mutual,
            chat: Some(chat),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptOutcome {
    pub friend: UserSummary,
    pub chat: ChatSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub ok: bool,
}

/// body of both send and accept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestBody {
    pub friend_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdsBody {
    pub user_ids: Vec<String>,
}
