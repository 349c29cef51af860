// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{error::Error, sync::Arc};

use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::config::Config;

pub mod memory;
pub mod models;
pub mod postgres;
pub mod schema;
mod store;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::Store;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("failed to connect to database: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel_async::pooled_connection::PoolError),
    #[error("failed to get a pooled connection: {0}")]
    Checkout(#[from] diesel_async::pooled_connection::bb8::RunError),
    #[error("failed to run database migrations: {0}")]
    Migration(String),
}

pub fn run_migrations(
    connection: &mut impl MigrationHarness<diesel::pg::Pg>,
) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    connection.run_pending_migrations(MIGRATIONS)?;

    Ok(())
}

/// Opens the store selected by `config`: Postgres when a database URL is
/// set, otherwise an in-memory store that is lost on restart.
pub async fn open_store(config: &Config) -> Result<Arc<dyn Store>, StoreError> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL is not set; data is kept in memory and lost on restart!");
        return Ok(Arc::new(MemoryStore::default()));
    };

    {
        let mut pg_connection = diesel::pg::PgConnection::establish(database_url)?;
        run_migrations(&mut pg_connection).map_err(|e| StoreError::Migration(e.to_string()))?;
    }
    tracing::info!("Database migrations are up to date");

    let store = PgStore::connect(database_url, config.pool_size).await?;
    Ok(Arc::new(store))
}
