//! Database layer for data persistence and access.
//!
//! One [`CustomerStore`] trait fronts three interchangeable backends, selected
//! by [`DatabaseConfig`](crate::config::DatabaseConfig):
//!
//! - [`mysql::MySqlStore`] - MySQL-dialect SQL over a bounded pool
//! - [`postgres::PgStore`] - PostgreSQL-dialect SQL over a bounded pool
//! - [`memory::InMemoryStore`] - process-local maps, for tests and development
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │CustomerStore│  (trait - queries & consistency rules)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Backend   │  (MySQL / PostgreSQL / in-memory)
//! └─────────────┘
//! ```
//!
//! Handlers hold the store as `Arc<dyn CustomerStore>`, constructed once at
//! startup by [`connect`] and shut down explicitly via
//! [`CustomerStore::close`]; there is no module-level singleton.

pub mod errors;
pub mod memory;
pub mod models;
pub mod mysql;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use tracing::info;

use crate::config::DatabaseConfig;
pub use store::CustomerStore;

/// Construct the storage backend named by the configuration.
///
/// The caller is expected to run [`CustomerStore::init_schema`] on the result
/// before serving requests.
pub async fn connect(config: &DatabaseConfig) -> errors::Result<Arc<dyn CustomerStore>> {
    Ok(match config {
        DatabaseConfig::Mysql { url, pool } => {
            info!("Connecting to MySQL backend");
            Arc::new(mysql::MySqlStore::connect(url, pool).await?)
        }
        DatabaseConfig::Postgres { url, pool } => {
            info!("Connecting to PostgreSQL backend");
            Arc::new(postgres::PgStore::connect(url, pool).await?)
        }
        DatabaseConfig::Memory => {
            info!("Using in-memory backend: data will be lost on shutdown");
            Arc::new(memory::InMemoryStore::new())
        }
    })
}
