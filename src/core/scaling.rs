//! RB-004: Serving-size calculator (input parsing and ingredient scaling).
//!
//! Scaled quantities are `quantity * target / for_people`, rounded to two
//! decimals half away from zero (`0.125` → `0.13`). Unscaled quantities are
//! printed exactly as stored.

use super::error::{Error, QuantityRejection, Result};
use super::types::{Ingredient, Recipe};
use std::num::NonZeroU32;

/// Parse a calculator submission into a target serving count.
///
/// Rejects blank input, anything that is not a number, NaN/infinity and
/// values that are zero or negative.
pub fn parse_people(raw: &str) -> std::result::Result<f64, QuantityRejection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuantityRejection::Blank);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| QuantityRejection::NotANumber)?;
    if value.is_nan() {
        return Err(QuantityRejection::NotANumber);
    }
    if value.is_infinite() {
        return Err(QuantityRejection::NotFinite);
    }
    if value <= 0.0 {
        return Err(QuantityRejection::NotPositive);
    }
    Ok(value)
}

/// The recipe's default serving count as a divisor.
pub fn people_base(recipe: &Recipe) -> Result<NonZeroU32> {
    u32::try_from(recipe.for_people)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| Error::InvalidRecipe {
            id: recipe.id.clone(),
            for_people: recipe.for_people,
        })
}

/// Round to two decimals, ties away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format one ingredient line, scaled when a usable target is given.
///
/// A missing, zero, negative or NaN target prints the stored quantity.
pub fn scale_ingredient(
    ingredient: &Ingredient,
    recipe_people: NonZeroU32,
    target_people: Option<f64>,
) -> String {
    match target_people {
        Some(target) if target > 0.0 && target.is_finite() => {
            let scaled = ingredient.quantity * target / f64::from(recipe_people.get());
            format!(
                "{:.2} {} {}",
                round2(scaled),
                ingredient.unit,
                ingredient.name
            )
        }
        _ => format!(
            "{} {} {}",
            ingredient.quantity, ingredient.unit, ingredient.name
        ),
    }
}

/// All ingredient lines of a recipe, in recipe order.
pub fn ingredient_lines(recipe: &Recipe, target_people: Option<f64>) -> Result<Vec<String>> {
    let base = people_base(recipe)?;
    Ok(recipe
        .ingredients
        .iter()
        .map(|ing| scale_ingredient(ing, base, target_people))
        .collect())
}
