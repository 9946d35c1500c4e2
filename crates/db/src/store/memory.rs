use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use candy_core::candy::{CandyItemPatch, NewCandyItem};
use candy_core::types::DbId;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{CandyStore, StorageBackend, StoreError};
use crate::models::candy_item::CandyItem;

#[derive(Debug, Default)]
struct Inner {
    last_id: DbId,
    items: HashMap<DbId, CandyItem>,
}

/// Process-local record store.
///
/// Ids start at 1 and are never reused. Cloning shares the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryCandyStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryCandyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CandyStore for MemoryCandyStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Memory
    }

    async fn list(&self) -> Result<Vec<CandyItem>, StoreError> {
        let inner = self.inner.read().await;
        let mut items: Vec<CandyItem> = inner.items.values().cloned().collect();
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(items)
    }

    async fn get(&self, id: DbId) -> Result<CandyItem, StoreError> {
        let inner = self.inner.read().await;
        inner
            .items
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn create(&self, input: &NewCandyItem) -> Result<CandyItem, StoreError> {
        input.validate()?;
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let item = CandyItem::from_new(inner.last_id, input, Utc::now());
        inner.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: DbId, patch: &CandyItemPatch) -> Result<CandyItem, StoreError> {
        patch.validate()?;
        let mut inner = self.inner.write().await;
        let item = inner
            .items
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(id))?;
        item.apply(patch, Utc::now());
        Ok(item.clone())
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use candy_core::error::CoreError;

    use super::*;

    fn candy(name: &str, weight_grams: i32) -> NewCandyItem {
        NewCandyItem {
            name: name.to_string(),
            color: "Rød".to_string(),
            weight_grams,
            sweetness_profile: "sweet".to_string(),
            intensity: "mild".to_string(),
            flavor_type: name.to_string(),
            ingredient_cost_minor_units: 16,
        }
    }

    #[tokio::test]
    async fn create_then_list_contains_new_record() {
        let store = MemoryCandyStore::new();
        let created = store.create(&candy("Jordbær", 11)).await.unwrap();

        let items = store.list().await.unwrap();
        assert_eq!(items, vec![created.clone()]);
        assert_eq!(created.name, "Jordbær");
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn ids_are_unique_and_not_reused() {
        let store = MemoryCandyStore::new();
        let first = store.create(&candy("A", 1)).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(&candy("B", 1)).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = MemoryCandyStore::new();
        let older = store.create(&candy("Older", 5)).await.unwrap();
        let newer = store.create(&candy("Newer", 5)).await.unwrap();

        let ids: Vec<DbId> = store.list().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn empty_update_only_advances_updated_at() {
        let store = MemoryCandyStore::new();
        let created = store.create(&candy("Citron", 10)).await.unwrap();
        let updated = store
            .update(created.id, &CandyItemPatch::default())
            .await
            .unwrap();

        assert!(updated.updated_at > created.updated_at);
        let mut expected = created.clone();
        expected.updated_at = updated.updated_at;
        assert_eq!(updated, expected);
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() {
        let store = MemoryCandyStore::new();
        let result = store.create(&candy("Zero", 0)).await;
        assert_matches!(result, Err(StoreError::Core(CoreError::Validation(_))));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleted_item_is_gone_for_update_and_delete() {
        let store = MemoryCandyStore::new();
        let created = store.create(&candy("Lakrids", 8)).await.unwrap();
        store.delete(created.id).await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
        assert_matches!(
            store.update(created.id, &CandyItemPatch::default()).await,
            Err(StoreError::Core(CoreError::NotFound { .. }))
        );
        assert_matches!(
            store.delete(created.id).await,
            Err(StoreError::Core(CoreError::NotFound { .. }))
        );
    }
}
