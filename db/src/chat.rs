use std::fmt::Debug;

use async_trait::async_trait;

use abi::errors::Result;
use abi::model::{Chat, ChatId};

#[async_trait]
pub trait ChatRepo: Sync + Send + Debug {
    /// chats in the order of `ids`, unknown ids are skipped
    async fn find_chats_by_ids(&self, ids: &[ChatId]) -> Result<Vec<Chat>>;

    /// compare-and-swap on `chat.version`; version 0 inserts a new chat
    async fn save_chat(&self, chat: Chat) -> Result<Chat>;
}
