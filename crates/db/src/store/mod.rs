//! Record store abstraction over candy items.
//!
//! The HTTP layer holds an `Arc<dyn CandyStore>` and never knows which
//! backend it talks to. The backend is chosen once at start-up from
//! configuration via [`StorageBackend`]:
//!
//! - [`PgCandyStore`]: PostgreSQL through [`crate::repositories::CandyItemRepo`].
//! - [`MemoryCandyStore`]: process-local map with the same semantics.
//! - [`NullCandyStore`]: offline mode; reads are empty and writes are no-ops.

mod memory;
mod null;
mod postgres;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use candy_core::candy::{CandyItemPatch, NewCandyItem, ENTITY};
use candy_core::error::CoreError;
use candy_core::types::DbId;

use crate::models::candy_item::CandyItem;

pub use memory::MemoryCandyStore;
pub use null::NullCandyStore;
pub use postgres::PgCandyStore;

/// Failure of a record store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Validation and not-found failures.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The storage engine could not be reached or rejected the query.
    #[error("Storage unavailable: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Not-found error for a candy item id.
    pub fn not_found(id: DbId) -> Self {
        Self::Core(CoreError::NotFound { entity: ENTITY, id })
    }
}

/// Which storage backend serves the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
    Offline,
}

impl StorageBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a configured backend name is not recognized.
#[derive(Debug, thiserror::Error)]
#[error("Unknown storage backend '{0}' (expected postgres, memory, or offline)")]
pub struct UnknownBackend(pub String);

impl FromStr for StorageBackend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            "offline" | "null" => Ok(Self::Offline),
            _ => Err(UnknownBackend(s.to_string())),
        }
    }
}

/// CRUD operations over candy items.
#[async_trait]
pub trait CandyStore: Send + Sync {
    /// The backend variant behind this store.
    fn backend(&self) -> StorageBackend;

    /// All items, newest first (ties broken by descending id).
    async fn list(&self) -> Result<Vec<CandyItem>, StoreError>;

    /// A single item by id.
    async fn get(&self, id: DbId) -> Result<CandyItem, StoreError>;

    /// Insert a validated item and return the stored record.
    async fn create(&self, input: &NewCandyItem) -> Result<CandyItem, StoreError>;

    /// Merge `patch` into the item and refresh `updated_at`.
    async fn update(&self, id: DbId, patch: &CandyItemPatch) -> Result<CandyItem, StoreError>;

    /// Permanently remove the item.
    async fn delete(&self, id: DbId) -> Result<(), StoreError>;

    /// Connectivity probe.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Number of stored items.
    async fn count(&self) -> Result<i64, StoreError> {
        let items = self.list().await?;
        Ok(i64::try_from(items.len()).unwrap_or(i64::MAX))
    }

    /// Release backend resources. Called once after the server drains.
    async fn close(&self) {}
}
