use async_trait::async_trait;
use candy_core::candy::{CandyItemPatch, NewCandyItem};
use candy_core::types::DbId;
use chrono::Utc;

use super::{CandyStore, StorageBackend, StoreError};
use crate::models::candy_item::CandyItem;

/// Offline record store used when no database is configured.
///
/// Nothing is persisted: `list` is always empty, `create` echoes back an
/// unsaved record with id 0, and `delete` succeeds without effect. There is
/// no stored record to merge a patch into, so `update` reports NotFound
/// like `get`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCandyStore;

#[async_trait]
impl CandyStore for NullCandyStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Offline
    }

    async fn list(&self) -> Result<Vec<CandyItem>, StoreError> {
        Ok(Vec::new())
    }

    async fn get(&self, id: DbId) -> Result<CandyItem, StoreError> {
        Err(StoreError::not_found(id))
    }

    async fn create(&self, input: &NewCandyItem) -> Result<CandyItem, StoreError> {
        input.validate()?;
        Ok(CandyItem::from_new(0, input, Utc::now()))
    }

    async fn update(&self, id: DbId, patch: &CandyItemPatch) -> Result<CandyItem, StoreError> {
        patch.validate()?;
        Err(StoreError::not_found(id))
    }

    async fn delete(&self, _id: DbId) -> Result<(), StoreError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
