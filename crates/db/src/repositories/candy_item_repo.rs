//! Repository for the `candy_items` table.

use candy_core::candy::{CandyItemPatch, NewCandyItem};
use candy_core::types::DbId;
use sqlx::PgPool;

use crate::models::candy_item::CandyItem;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, color, weight_grams, sweetness_profile, intensity, \
     flavor_type, ingredient_cost_minor_units, created_at, updated_at";

/// Provides CRUD operations for candy items.
pub struct CandyItemRepo;

impl CandyItemRepo {
    /// Insert a new candy item, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewCandyItem) -> Result<CandyItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO candy_items
                (name, color, weight_grams, sweetness_profile, intensity, flavor_type,
                 ingredient_cost_minor_units)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CandyItem>(&query)
            .bind(&input.name)
            .bind(&input.color)
            .bind(input.weight_grams)
            .bind(&input.sweetness_profile)
            .bind(&input.intensity)
            .bind(&input.flavor_type)
            .bind(input.ingredient_cost_minor_units)
            .fetch_one(pool)
            .await
    }

    /// Find a candy item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CandyItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM candy_items WHERE id = $1");
        sqlx::query_as::<_, CandyItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all candy items, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<CandyItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM candy_items ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, CandyItem>(&query).fetch_all(pool).await
    }

    /// Update a candy item. Only non-`None` fields in `input` are applied.
    ///
    /// `updated_at` is always refreshed and never moves backwards.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CandyItemPatch,
    ) -> Result<Option<CandyItem>, sqlx::Error> {
        let query = format!(
            "UPDATE candy_items SET
                name = COALESCE($2, name),
                color = COALESCE($3, color),
                weight_grams = COALESCE($4, weight_grams),
                sweetness_profile = COALESCE($5, sweetness_profile),
                intensity = COALESCE($6, intensity),
                flavor_type = COALESCE($7, flavor_type),
                ingredient_cost_minor_units = COALESCE($8, ingredient_cost_minor_units),
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CandyItem>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(input.weight_grams)
            .bind(&input.sweetness_profile)
            .bind(&input.intensity)
            .bind(&input.flavor_type)
            .bind(input.ingredient_cost_minor_units)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a candy item by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM candy_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all candy items.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM candy_items")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
