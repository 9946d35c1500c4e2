//! Candy item row model.

use candy_core::candy::{CandyItemPatch, NewCandyItem};
use candy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `candy_items` table.
///
/// Serialized with camelCase keys to match the public JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandyItem {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub weight_grams: i32,
    pub sweetness_profile: String,
    pub intensity: String,
    pub flavor_type: String,
    pub ingredient_cost_minor_units: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CandyItem {
    /// Materialize a validated input as a record stamped at `now`.
    pub fn from_new(id: DbId, input: &NewCandyItem, now: Timestamp) -> Self {
        Self {
            id,
            name: input.name.clone(),
            color: input.color.clone(),
            weight_grams: input.weight_grams,
            sweetness_profile: input.sweetness_profile.clone(),
            intensity: input.intensity.clone(),
            flavor_type: input.flavor_type.clone(),
            ingredient_cost_minor_units: input.ingredient_cost_minor_units,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the present fields of `patch` and refresh `updated_at`.
    ///
    /// `updated_at` always moves forward, even when the clock has not
    /// advanced since the previous write.
    pub fn apply(&mut self, patch: &CandyItemPatch, now: Timestamp) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(color) = &patch.color {
            self.color.clone_from(color);
        }
        if let Some(weight) = patch.weight_grams {
            self.weight_grams = weight;
        }
        if let Some(sweetness) = &patch.sweetness_profile {
            self.sweetness_profile.clone_from(sweetness);
        }
        if let Some(intensity) = &patch.intensity {
            self.intensity.clone_from(intensity);
        }
        if let Some(flavor_type) = &patch.flavor_type {
            self.flavor_type.clone_from(flavor_type);
        }
        if let Some(cost) = patch.ingredient_cost_minor_units {
            self.ingredient_cost_minor_units = cost;
        }
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + chrono::Duration::microseconds(1)
        };
    }
}
