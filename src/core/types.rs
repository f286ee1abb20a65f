//! RB-001: Catalog data types.
//!
//! Mirrors the `recipes.json` data source. All types derive
//! Serialize/Deserialize so a loaded catalog can be dumped back out.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Stable recipe identifier.
///
/// The data source may carry ids as strings or integers; both normalise to
/// the same textual form so `1` and `"1"` name the same recipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawRecipeId", into = "String")]
pub struct RecipeId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecipeId {
    Int(i64),
    Text(String),
}

impl From<RawRecipeId> for RecipeId {
    fn from(raw: RawRecipeId) -> Self {
        match raw {
            RawRecipeId::Int(n) => Self(n.to_string()),
            RawRecipeId::Text(s) => Self(s),
        }
    }
}

impl From<RecipeId> for String {
    fn from(id: RecipeId) -> Self {
        id.0
    }
}

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RecipeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Recipes
// ============================================================================

/// A single recipe as loaded from the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique, stable identifier
    pub id: RecipeId,

    /// Display title
    pub title: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Thumbnail image file name (relative to the image base)
    pub thumb_img: String,

    /// Full-size image file name, when the recipe has one
    #[serde(default)]
    pub full_img: Option<String>,

    /// Default serving count the quantities are written for
    pub for_people: i64,

    /// Ingredients, in display order
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    /// Preparation steps, sorted by `order` at display time
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

/// One ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    pub name: String,
}

/// One preparation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub description: String,
    /// Display position; may repeat or skip values
    pub order: i64,
}

impl Ingredient {
    pub fn new(quantity: f64, unit: &str, name: &str) -> Self {
        Self {
            quantity,
            unit: unit.to_string(),
            name: name.to_string(),
        }
    }
}

impl Instruction {
    pub fn new(order: i64, description: &str) -> Self {
        Self {
            description: description.to_string(),
            order,
        }
    }
}
