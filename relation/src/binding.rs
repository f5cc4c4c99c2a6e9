use tracing::debug;

use abi::errors::Result;
use abi::model::{Chat, ChatId, User};

use crate::RelationService;

impl RelationService {
    /// Resolves the pairwise chat of `a` and `b` or builds a new one, and registers it in
    /// both users' chat sets. Nothing is written here: the caller commits the chat together
    /// with both users, while holding the pair lock.
    pub(crate) async fn bind_chat(&self, a: &mut User, b: &mut User) -> Result<Chat> {
        let candidates = candidate_ids(a, b);
        let chats = self
            .guarded(self.db.chat.find_chats_by_ids(&candidates))
            .await?;

        let chat = match find_pairwise(chats, &a.id, &b.id) {
            Some(mut chat) => {
                debug!("reuse chat {} for {} and {}", chat.id, a.id, b.id);
                chat.canonicalize_pair(&a.id, &b.id);
                chat
            }
            None => {
                let chat = Chat::pairwise(&a.id, &b.id, chrono::Utc::now().timestamp_millis());
                debug!("new chat {} for {} and {}", chat.id, a.id, b.id);
                chat
            }
        };

        a.join_chat(&chat.id);
        b.join_chat(&chat.id);
        Ok(chat)
    }
}

/// chats of the first party, then those of the second one that the first does not list
fn candidate_ids(a: &User, b: &User) -> Vec<ChatId> {
    let mut ids = a.chats.clone();
    for id in &b.chats {
        if !ids.contains(id) {
            ids.push(id.clone());
        }
    }
    ids
}

/// The first non-group chat whose members are exactly {a, b}.
pub(crate) fn find_pairwise(chats: Vec<Chat>, a: &str, b: &str) -> Option<Chat> {
    chats.into_iter().find(|chat| chat.is_pair_of(a, b))
}
