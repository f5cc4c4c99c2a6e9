use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use abi::errors::{Error, Result};
use abi::model::{Chat, ChatId, User, UserId};

use crate::chat::ChatRepo;
use crate::tx::{ChangeSet, Transactor};
use crate::user::UserRepo;

/// Process-local store. One lock guards users and chats together, which makes a commit atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
    unavailable: AtomicBool,
}

#[derive(Debug, Default)]
struct State {
    // ordered by id, like the postgres listing
    users: BTreeMap<UserId, User>,
    chats: HashMap<ChatId, Chat>,
}

impl State {
    fn check_user(&self, user: &User) -> Result<()> {
        check_version(
            "user",
            &user.id,
            self.users.get(&user.id).map(|u| u.version),
            user.version,
        )
    }

    fn check_chat(&self, chat: &Chat) -> Result<()> {
        check_version(
            "chat",
            &chat.id,
            self.chats.get(&chat.id).map(|c| c.version),
            chat.version,
        )
    }

    fn put_user(&mut self, mut user: User) -> User {
        user.version += 1;
        self.users.insert(user.id.clone(), user.clone());
        user
    }

    fn put_chat(&mut self, mut chat: Chat) -> Chat {
        chat.version += 1;
        self.chats.insert(chat.id.clone(), chat.clone());
        chat
    }
}

fn check_version(what: &str, id: &str, stored: Option<u64>, incoming: u64) -> Result<()> {
    match stored {
        Some(version) if version == incoming => Ok(()),
        None if incoming == 0 => Ok(()),
        Some(version) => Err(Error::conflict(format!(
            "{what} {id} is at version {version}, write was based on {incoming}"
        ))),
        None => Err(Error::conflict(format!(
            "{what} {id} vanished, write was based on version {incoming}"
        ))),
    }
}

impl MemoryStore {
    pub async fn with_users(users: impl IntoIterator<Item = User>) -> Result<Self> {
        let store = Self::default();
        for user in users {
            store.save_user(user).await?;
        }
        Ok(store)
    }

    /// Loads a json array of users.
    pub async fn from_seed(path: impl AsRef<Path>) -> Result<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        let users: Vec<User> = serde_json::from_str(&content)?;
        debug!("seeding memory store with {} users", users.len());
        Self::with_users(users).await
    }

    /// Makes every following call fail with `StoreUnavailable`, like a dropped connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn all_chats(&self) -> Vec<Chat> {
        self.state.read().await.chats.values().cloned().collect()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::store_unavailable("memory store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.check_available()?;
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn find_user_by_handle_or_email(&self, key: &str) -> Result<Option<User>> {
        self.check_available()?;
        let state = self.state.read().await;
        let user = state
            .users
            .values()
            .find(|user| user.handle == key || user.email.eq_ignore_ascii_case(key))
            .cloned();
        Ok(user)
    }

    async fn find_users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id))
            .cloned()
            .collect())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.users.values().cloned().collect())
    }

    async fn save_user(&self, user: User) -> Result<User> {
        self.check_available()?;
        let mut state = self.state.write().await;
        state.check_user(&user)?;
        Ok(state.put_user(user))
    }
}

#[async_trait]
impl ChatRepo for MemoryStore {
    async fn find_chats_by_ids(&self, ids: &[ChatId]) -> Result<Vec<Chat>> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.chats.get(id))
            .cloned()
            .collect())
    }

    async fn save_chat(&self, chat: Chat) -> Result<Chat> {
        self.check_available()?;
        let mut state = self.state.write().await;
        state.check_chat(&chat)?;
        Ok(state.put_chat(chat))
    }
}

#[async_trait]
impl Transactor for MemoryStore {
    async fn commit(&self, changes: ChangeSet) -> Result<()> {
        self.check_available()?;
        let mut state = self.state.write().await;
        // validate everything before touching anything
        for user in &changes.users {
            state.check_user(user)?;
        }
        for chat in &changes.chats {
            state.check_chat(chat)?;
        }
        for user in changes.users {
            state.put_user(user);
        }
        for chat in changes.chats {
            state.put_chat(chat);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abi::errors::ErrorKind;

    fn user(id: &str) -> User {
        User::new(id, id.to_uppercase(), format!("@{id}"), format!("{id}@example.com"))
    }

    #[tokio::test]
    async fn save_bumps_version_and_rejects_stale_writes() {
        let store = MemoryStore::default();
        let stored = store.save_user(user("a")).await.unwrap();
        assert_eq!(stored.version, 1);

        let mut stale = user("a");
        stale.name = "stale".into();
        let err = store.save_user(stale).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let mut fresh = stored.clone();
        fresh.name = "fresh".into();
        let saved = store.save_user(fresh).await.unwrap();
        assert_eq!(saved.version, 2);
        let found = store.find_user_by_id("a").await.unwrap().unwrap();
        assert_eq!(found.name, "fresh");
    }

    #[tokio::test]
    async fn commit_is_all_or_nothing() {
        let store = MemoryStore::with_users([user("a"), user("b")]).await.unwrap();
        let mut a = store.find_user_by_id("a").await.unwrap().unwrap();
        let mut b = store.find_user_by_id("b").await.unwrap().unwrap();
        a.befriend("b");
        b.befriend("a");
        // b is stale, so neither write may land
        b.version = 0;
        let chat = Chat::pairwise("a", "b", 0);
        let err = store
            .commit(ChangeSet::new(vec![a, b], vec![chat]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let a = store.find_user_by_id("a").await.unwrap().unwrap();
        assert!(a.friends.is_empty());
        assert_eq!(a.version, 1);
        assert!(store.all_chats().await.is_empty());
    }

    #[tokio::test]
    async fn commit_writes_users_and_chats_together() {
        let store = MemoryStore::with_users([user("a"), user("b")]).await.unwrap();
        let mut a = store.find_user_by_id("a").await.unwrap().unwrap();
        let chat = Chat::pairwise("a", "b", 0);
        a.join_chat(&chat.id);
        store
            .commit(ChangeSet::new(vec![a], vec![chat.clone()]))
            .await
            .unwrap();

        let chats = store.find_chats_by_ids(&[chat.id.clone()]).await.unwrap();
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0].version, 1);
        let a = store.find_user_by_id("a").await.unwrap().unwrap();
        assert_eq!(a.chats, vec![chat.id]);
    }

    #[tokio::test]
    async fn lookup_by_handle_or_email() {
        let store = MemoryStore::with_users([user("a"), user("b")]).await.unwrap();
        let by_handle = store.find_user_by_handle_or_email("@b").await.unwrap();
        assert_eq!(by_handle.unwrap().id, "b");
        let by_email = store
            .find_user_by_handle_or_email("A@Example.com")
            .await
            .unwrap();
        assert_eq!(by_email.unwrap().id, "a");
        assert!(store
            .find_user_by_handle_or_email("b")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn batch_reads_keep_requested_order_and_listing_is_by_id() {
        let store = MemoryStore::with_users([user("c"), user("a"), user("b")])
            .await
            .unwrap();
        let ids: Vec<String> = vec!["c".into(), "ghost".into(), "a".into()];
        let users = store.find_users_by_ids(&ids).await.unwrap();
        let found: Vec<_> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(found, vec!["c", "a"]);

        let all: Vec<_> = store
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(all, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn offline_store_fails_every_call() {
        let store = MemoryStore::with_users([user("a")]).await.unwrap();
        store.set_unavailable(true);
        let err = store.find_user_by_id("a").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
        let err = store.commit(ChangeSet::default()).await.unwrap_err();
        assert!(err.is_retryable());
        store.set_unavailable(false);
        assert!(store.find_user_by_id("a").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn seed_file_is_loaded() {
        let store = MemoryStore::from_seed("../abi/fixtures/seed.json")
            .await
            .unwrap();
        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 3);
        let ada = store.find_user_by_id("u-ada").await.unwrap().unwrap();
        assert_eq!(ada.notifications.len(), 1);
    }
}
