//! Field rules for candy catalog items.
//!
//! Request bodies arrive as loosely typed JSON: numeric fields may be sent as
//! numbers or as numeric strings. [`CandyItemPayload`] captures the raw body,
//! and [`NewCandyItem`] / [`CandyItemPatch`] are the validated forms handed to
//! the record store.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Named constants
-------------------------------------------------------------------------- */

/// Entity name used in not-found errors.
pub const ENTITY: &str = "CandyItem";

pub const SWEETNESS_SWEET: &str = "sweet";
pub const SWEETNESS_SLIGHTLY_BITTER: &str = "slightly bitter";
pub const SWEETNESS_BITTER: &str = "bitter";

/// All recognized sweetness profiles.
pub const SWEETNESS_PROFILES: &[&str] =
    &[SWEETNESS_SWEET, SWEETNESS_SLIGHTLY_BITTER, SWEETNESS_BITTER];

pub const INTENSITY_MILD: &str = "mild";
pub const INTENSITY_MEDIUM: &str = "medium";
pub const INTENSITY_STRONG: &str = "strong";

/// All recognized flavor intensities.
pub const INTENSITIES: &[&str] = &[INTENSITY_MILD, INTENSITY_MEDIUM, INTENSITY_STRONG];

/// Sweetness profile applied when a create request omits it.
pub const DEFAULT_SWEETNESS: &str = SWEETNESS_SWEET;

/// Intensity applied when a create request omits it.
pub const DEFAULT_INTENSITY: &str = INTENSITY_MILD;

/* --------------------------------------------------------------------------
Request payload
-------------------------------------------------------------------------- */

/// Raw candy item body as sent by clients, for both create and update.
///
/// Unknown keys (for example `id` or `createdAt` echoed back by a UI) are
/// ignored. `null` is treated the same as an absent key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandyItemPayload {
    pub name: Option<String>,
    pub color: Option<String>,
    pub weight_grams: Option<Value>,
    pub sweetness_profile: Option<String>,
    pub intensity: Option<String>,
    pub flavor_type: Option<String>,
    pub ingredient_cost_minor_units: Option<Value>,
}

/// Coerce a JSON value into an integer.
///
/// Accepts integers, finite floats (truncated toward zero) and strings that
/// hold an integer. Returns `None` for anything else.
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a required text field is not blank.
pub fn validate_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Validate a weight in grams and narrow it to the stored width.
pub fn validate_weight(weight: i64) -> Result<i32, CoreError> {
    if weight <= 0 {
        return Err(CoreError::Validation(
            "weightGrams must be greater than 0".to_string(),
        ));
    }
    i32::try_from(weight).map_err(|_| {
        CoreError::Validation(format!("weightGrams must not exceed {}", i32::MAX))
    })
}

/// Validate that an ingredient cost is not negative.
pub fn validate_cost(cost: i64) -> Result<i64, CoreError> {
    if cost < 0 {
        return Err(CoreError::Validation(
            "ingredientCostMinorUnits must not be negative".to_string(),
        ));
    }
    Ok(cost)
}

/// Validate that the given value is a recognized sweetness profile.
pub fn validate_sweetness(value: &str) -> Result<(), CoreError> {
    if SWEETNESS_PROFILES.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown sweetnessProfile: '{}'. Valid values: {}",
            value,
            SWEETNESS_PROFILES.join(", ")
        )))
    }
}

/// Validate that the given value is a recognized intensity.
pub fn validate_intensity(value: &str) -> Result<(), CoreError> {
    if INTENSITIES.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown intensity: '{}'. Valid values: {}",
            value,
            INTENSITIES.join(", ")
        )))
    }
}

fn required_text(field: &str, value: Option<String>) -> Result<String, CoreError> {
    let value = value.ok_or_else(|| CoreError::Validation(format!("{field} is required")))?;
    validate_text(field, &value)?;
    Ok(value)
}

fn parse_field(field: &str, value: &Value) -> Result<i64, CoreError> {
    parse_int(value).ok_or_else(|| CoreError::Validation(format!("{field} must be an integer")))
}

/// Blank enum-like values count as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/* --------------------------------------------------------------------------
Validated inputs
-------------------------------------------------------------------------- */

/// A fully validated candy item ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandyItem {
    pub name: String,
    pub color: String,
    pub weight_grams: i32,
    pub sweetness_profile: String,
    pub intensity: String,
    pub flavor_type: String,
    pub ingredient_cost_minor_units: i64,
}

impl NewCandyItem {
    /// Build a new item from a create request body.
    ///
    /// `weightGrams` is required and must be positive. A missing or
    /// malformed `ingredientCostMinorUnits` becomes 0, and the enum-like
    /// fields fall back to [`DEFAULT_SWEETNESS`] and [`DEFAULT_INTENSITY`].
    pub fn from_payload(payload: CandyItemPayload) -> Result<Self, CoreError> {
        let name = required_text("name", payload.name)?;
        let color = required_text("color", payload.color)?;
        let flavor_type = required_text("flavorType", payload.flavor_type)?;

        let weight = payload
            .weight_grams
            .as_ref()
            .and_then(parse_int)
            .ok_or_else(|| {
                CoreError::Validation("weightGrams must be a positive integer".to_string())
            })?;
        let weight_grams = validate_weight(weight)?;

        let ingredient_cost_minor_units = match payload
            .ingredient_cost_minor_units
            .as_ref()
            .and_then(parse_int)
        {
            Some(cost) => validate_cost(cost)?,
            None => 0,
        };

        let item = Self {
            name,
            color,
            weight_grams,
            sweetness_profile: non_blank(payload.sweetness_profile)
                .unwrap_or_else(|| DEFAULT_SWEETNESS.to_string()),
            intensity: non_blank(payload.intensity)
                .unwrap_or_else(|| DEFAULT_INTENSITY.to_string()),
            flavor_type,
            ingredient_cost_minor_units,
        };
        item.validate()?;
        Ok(item)
    }

    /// Re-check every invariant on an already typed item.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_text("name", &self.name)?;
        validate_text("color", &self.color)?;
        validate_text("flavorType", &self.flavor_type)?;
        validate_weight(i64::from(self.weight_grams))?;
        validate_cost(self.ingredient_cost_minor_units)?;
        validate_sweetness(&self.sweetness_profile)?;
        validate_intensity(&self.intensity)
    }
}

/// A partial update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandyItemPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub weight_grams: Option<i32>,
    pub sweetness_profile: Option<String>,
    pub intensity: Option<String>,
    pub flavor_type: Option<String>,
    pub ingredient_cost_minor_units: Option<i64>,
}

impl CandyItemPatch {
    /// Build a patch from an update request body.
    ///
    /// Fields that are present must satisfy the same rules as on create; a
    /// numeric field that cannot be parsed is rejected rather than ignored.
    pub fn from_payload(payload: CandyItemPayload) -> Result<Self, CoreError> {
        let weight_grams = payload
            .weight_grams
            .as_ref()
            .map(|v| parse_field("weightGrams", v).and_then(validate_weight))
            .transpose()?;
        let ingredient_cost_minor_units = payload
            .ingredient_cost_minor_units
            .as_ref()
            .map(|v| parse_field("ingredientCostMinorUnits", v).and_then(validate_cost))
            .transpose()?;

        let patch = Self {
            name: payload.name,
            color: payload.color,
            weight_grams,
            sweetness_profile: payload.sweetness_profile,
            intensity: payload.intensity,
            flavor_type: payload.flavor_type,
            ingredient_cost_minor_units,
        };
        patch.validate()?;
        Ok(patch)
    }

    /// Check every field that is present.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            validate_text("name", name)?;
        }
        if let Some(color) = &self.color {
            validate_text("color", color)?;
        }
        if let Some(flavor_type) = &self.flavor_type {
            validate_text("flavorType", flavor_type)?;
        }
        if let Some(weight) = self.weight_grams {
            validate_weight(i64::from(weight))?;
        }
        if let Some(cost) = self.ingredient_cost_minor_units {
            validate_cost(cost)?;
        }
        if let Some(sweetness) = &self.sweetness_profile {
            validate_sweetness(sweetness)?;
        }
        if let Some(intensity) = &self.intensity {
            validate_intensity(intensity)?;
        }
        Ok(())
    }

    /// True when the patch carries no field changes.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
