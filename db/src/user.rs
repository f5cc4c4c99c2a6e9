use std::fmt::Debug;

use async_trait::async_trait;

use abi::errors::Result;
use abi::model::{User, UserId};

#[async_trait]
pub trait UserRepo: Sync + Send + Debug {
    /// get user by id
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>>;

    /// match the handle exactly or the email case-insensitively; the lowest id wins a tie
    async fn find_user_by_handle_or_email(&self, key: &str) -> Result<Option<User>>;

    /// users in the order of `ids`, unknown ids are skipped
    async fn find_users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>>;

    /// every user, ordered by id on every backend
    async fn list_users(&self) -> Result<Vec<User>>;

    /// compare-and-swap on `user.version`; version 0 inserts a new user.
    /// returns the stored user with its bumped version
    async fn save_user(&self, user: User) -> Result<User>;
}
