use std::fmt::Debug;

use async_trait::async_trait;

use abi::errors::Result;
use abi::model::{Chat, User};

/// Everything one relationship transition writes.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub users: Vec<User>,
    pub chats: Vec<Chat>,
}

impl ChangeSet {
    pub fn new(users: Vec<User>, chats: Vec<Chat>) -> Self {
        Self { users, chats }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.chats.is_empty()
    }
}

#[async_trait]
pub trait Transactor: Sync + Send + Debug {
    /// Writes every entry or none of them. Each entry is checked against its stored version;
    /// one stale entry fails the whole set with `Conflict`.
    ///
    /// A caller that gives up waiting (timeout, dropped request) cannot tell whether the
    /// commit landed: once the backend has received it, the write may be applied anyway.
    /// Re-reading the entries is the only way to find out.
    async fn commit(&self, changes: ChangeSet) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_set_is_empty_until_something_is_staged() {
        assert!(ChangeSet::default().is_empty());
        let users = vec![User::new("a", "A", "@a", "a@example.com")];
        assert!(!ChangeSet::new(users, Vec::new()).is_empty());
        assert!(!ChangeSet::new(Vec::new(), vec![Chat::pairwise("a", "b", 0)]).is_empty());
    }
}
