//! Demo catalog data for fresh installations.

use candy_core::candy::{NewCandyItem, INTENSITY_MILD, SWEETNESS_BITTER, SWEETNESS_SWEET};

use crate::store::{CandyStore, StoreError};

/// The sample items a new catalog starts with.
pub fn demo_items() -> Vec<NewCandyItem> {
    vec![
        NewCandyItem {
            name: "Jordbær".to_string(),
            color: "Rød".to_string(),
            weight_grams: 11,
            sweetness_profile: SWEETNESS_SWEET.to_string(),
            intensity: INTENSITY_MILD.to_string(),
            flavor_type: "Jordbær".to_string(),
            ingredient_cost_minor_units: 16,
        },
        NewCandyItem {
            name: "Citron".to_string(),
            color: "Gul".to_string(),
            weight_grams: 10,
            sweetness_profile: SWEETNESS_BITTER.to_string(),
            intensity: INTENSITY_MILD.to_string(),
            flavor_type: "Citron".to_string(),
            ingredient_cost_minor_units: 14,
        },
    ]
}

/// Insert [`demo_items`] when the store holds no items.
///
/// Returns the number of items inserted.
pub async fn seed_if_empty(store: &dyn CandyStore) -> Result<usize, StoreError> {
    if store.count().await? > 0 {
        tracing::debug!(backend = %store.backend(), "Store not empty, skipping demo seed");
        return Ok(0);
    }

    let items = demo_items();
    for item in &items {
        store.create(item).await?;
    }
    tracing::info!(backend = %store.backend(), count = items.len(), "Seeded demo candy items");
    Ok(items.len())
}
