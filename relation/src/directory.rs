use abi::errors::{Error, Result};
use abi::model::{User, UserId};
use abi::types::{ChatSummary, SelfSummary, UserSummary};

use crate::RelationService;

/// Emails keep their address, lower-cased; anything else is a handle and gets its `@`.
pub fn normalize_lookup_key(key: &str) -> String {
    let key = key.trim();
    let is_email = key.char_indices().any(|(i, c)| c == '@' && i > 0);
    if is_email {
        key.to_lowercase()
    } else if key.starts_with('@') {
        key.to_string()
    } else {
        format!("@{key}")
    }
}

impl RelationService {
    /// Users who asked `user_id` for friendship, in the order they asked.
    pub async fn list_friend_requests(&self, user_id: &str) -> Result<Vec<UserSummary>> {
        let user = self.find_user(user_id).await?;
        self.summaries(&user.received_friend_requests).await
    }

    pub async fn get_self(&self, user_id: &str) -> Result<SelfSummary> {
        let user = self.find_user(user_id).await?;
        let friends = self.summaries(&user.friends).await?;
        let sent_friend_requests = self.summaries(&user.sent_friend_requests).await?;
        let received_friend_requests = self.summaries(&user.received_friend_requests).await?;

        let chats = self
            .guarded(self.db.chat.find_chats_by_ids(&user.chats))
            .await?;
        let mut member_ids: Vec<UserId> = Vec::new();
        for chat in &chats {
            for member in &chat.members {
                if !member_ids.contains(member) {
                    member_ids.push(member.clone());
                }
            }
        }
        let members = self
            .guarded(self.db.user.find_users_by_ids(&member_ids))
            .await?;
        let chats = chats
            .iter()
            .map(|chat| ChatSummary::project(chat, &members))
            .collect();

        Ok(SelfSummary {
            user: UserSummary::from(&user),
            email: user.email,
            friends,
            sent_friend_requests,
            received_friend_requests,
            chats,
        })
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>> {
        let users = self.guarded(self.db.user.list_users()).await?;
        Ok(users.iter().map(UserSummary::from).collect())
    }

    /// Summaries for the given ids; ids that do not resolve are skipped.
    pub async fn get_users_by_ids(&self, ids: &[UserId]) -> Result<Vec<UserSummary>> {
        self.summaries(ids).await
    }

    pub async fn lookup_user(&self, key: &str) -> Result<UserSummary> {
        let key = normalize_lookup_key(key);
        if key == "@" {
            return Err(Error::bad_request("empty handle or email"));
        }
        let user: Option<User> = self
            .guarded(self.db.user.find_user_by_handle_or_email(&key))
            .await?;
        user.as_ref()
            .map(UserSummary::from)
            .ok_or_else(|| Error::not_found_with_details(format!("no user found for {key}")))
    }

    async fn summaries(&self, ids: &[UserId]) -> Result<Vec<UserSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = self.guarded(self.db.user.find_users_by_ids(ids)).await?;
        Ok(users.iter().map(UserSummary::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_get_their_prefix() {
        assert_eq!(normalize_lookup_key("ada"), "@ada");
        assert_eq!(normalize_lookup_key("@ada"), "@ada");
        assert_eq!(normalize_lookup_key("  ada "), "@ada");
    }

    #[test]
    fn emails_are_lower_cased() {
        assert_eq!(normalize_lookup_key("Ada@Example.com"), "ada@example.com");
    }
}
