use async_trait::async_trait;
use candy_core::candy::{CandyItemPatch, NewCandyItem};
use candy_core::types::DbId;

use super::{CandyStore, StorageBackend, StoreError};
use crate::models::candy_item::CandyItem;
use crate::repositories::CandyItemRepo;
use crate::DbPool;

/// PostgreSQL-backed record store.
#[derive(Debug, Clone)]
pub struct PgCandyStore {
    pool: DbPool,
}

impl PgCandyStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandyStore for PgCandyStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Postgres
    }

    async fn list(&self) -> Result<Vec<CandyItem>, StoreError> {
        Ok(CandyItemRepo::list(&self.pool).await?)
    }

    async fn get(&self, id: DbId) -> Result<CandyItem, StoreError> {
        CandyItemRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn create(&self, input: &NewCandyItem) -> Result<CandyItem, StoreError> {
        input.validate()?;
        Ok(CandyItemRepo::create(&self.pool, input).await?)
    }

    async fn update(&self, id: DbId, patch: &CandyItemPatch) -> Result<CandyItem, StoreError> {
        patch.validate()?;
        CandyItemRepo::update(&self.pool, id, patch)
            .await?
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        if CandyItemRepo::delete(&self.pool, id).await? {
            Ok(())
        } else {
            Err(StoreError::not_found(id))
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(CandyItemRepo::count(&self.pool).await?)
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}
