mod binding;
mod directory;
mod lock;
mod notification;
mod protocol;

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use abi::config::{Config, StoreConfig};
use abi::errors::{Error, ErrorKind, Result};
use abi::model::User;
use db::DbRepo;

pub use directory::normalize_lookup_key;
pub use lock::{pair_key, PairGuard, PairLocks};
pub use notification::NotificationFeed;

/// Entry point for every relationship operation. Holds no relationship state itself,
/// only the handles to the stores and the per-pair locks.
#[derive(Debug, Clone)]
pub struct RelationService {
    db: DbRepo,
    locks: PairLocks,
    timeout: Duration,
    max_retries: u32,
}

impl RelationService {
    pub fn new(db: DbRepo, config: &StoreConfig) -> Self {
        Self {
            db,
            locks: PairLocks::default(),
            timeout: config.timeout(),
            max_retries: config.max_retries,
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self> {
        let db = DbRepo::new(config).await?;
        Ok(Self::new(db, &config.store))
    }

    pub fn locks(&self) -> &PairLocks {
        &self.locks
    }

    /// Bounds a store call; running out of time is reported as `StoreUnavailable`.
    /// For a commit that outlives the bound the write may still have landed, so a retried
    /// transition can observe its own earlier result (e.g. `InvalidState` for a friendship
    /// that was just completed).
    pub(crate) async fn guarded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.timeout, call).await?
    }

    /// Re-runs `attempt` while it fails with a version conflict, up to `max_retries` times.
    pub(crate) async fn retrying<T, F, Fut>(&self, op: &str, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut retries = 0;
        loop {
            match attempt().await {
                Err(e) if e.kind() == ErrorKind::Conflict && retries < self.max_retries => {
                    retries += 1;
                    warn!("{op}: version conflict, retry {retries}/{}: {e}", self.max_retries);
                    tokio::time::sleep(Duration::from_millis(5 * retries as u64)).await;
                }
                other => return other,
            }
        }
    }

    pub(crate) async fn find_user(&self, id: &str) -> Result<User> {
        self.guarded(self.db.user.find_user_by_id(id))
            .await?
            .ok_or_else(|| Error::not_found_with_details(format!("no user found for id {id}")))
    }
}
