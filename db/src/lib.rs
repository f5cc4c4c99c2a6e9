mod memory;
mod postgres;

pub mod chat;
pub mod tx;
pub mod user;

use std::fmt::Debug;
use std::sync::Arc;

use tracing::info;

use abi::config::{Config, StoreBackend};
use abi::errors::Result;

pub use crate::chat::ChatRepo;
pub use crate::memory::MemoryStore;
pub use crate::postgres::PostgresStore;
pub use crate::tx::{ChangeSet, Transactor};
pub use crate::user::UserRepo;

/// Relationship Store, Chat Store and the atomic commit over both.
/// All three usually point at the same backend object.
#[derive(Debug, Clone)]
pub struct DbRepo {
    pub user: Arc<dyn UserRepo>,
    pub chat: Arc<dyn ChatRepo>,
    pub tx: Arc<dyn Transactor>,
}

impl DbRepo {
    pub async fn new(config: &Config) -> Result<Self> {
        match config.store.backend {
            StoreBackend::Memory => {
                let store = match &config.store.seed {
                    Some(seed) => MemoryStore::from_seed(seed).await?,
                    None => MemoryStore::default(),
                };
                info!("using memory store");
                Ok(Self::from_store(Arc::new(store)))
            }
            StoreBackend::Postgres => {
                let store = PostgresStore::connect(config).await?;
                info!("using postgres store");
                Ok(Self::from_store(Arc::new(store)))
            }
        }
    }

    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepo + ChatRepo + Transactor + Debug + 'static,
    {
        Self {
            user: store.clone(),
            chat: store.clone(),
            tx: store,
        }
    }
}
