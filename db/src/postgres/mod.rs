mod chat;
mod user;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::debug;

use abi::config::Config;
use abi::errors::{Error, ErrorKind, Result};

use crate::tx::{ChangeSet, Transactor};

/// Users and chats in two tables; relationship sets are text arrays.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &Config) -> Result<Self> {
        let pg = &config.db.postgres;
        let pool = PgPoolOptions::new()
            .max_connections(pg.max_connections)
            .acquire_timeout(Duration::from_millis(config.store.timeout_ms))
            .connect(&pg.url())
            .await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| Error::new(ErrorKind::StoreUnavailable, "run migrations", e))?;
        debug!("postgres store ready: {}:{}", pg.host, pg.port);
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Transactor for PostgresStore {
    async fn commit(&self, changes: ChangeSet) -> Result<()> {
        // dropping the transaction on an early return rolls everything back
        let mut transaction = self.pool.begin().await?;
        for user in &changes.users {
            user::write_user(&mut *transaction, user).await?;
        }
        for chat in &changes.chats {
            chat::write_chat(&mut *transaction, chat).await?;
        }
        transaction.commit().await?;
        Ok(())
    }
}
