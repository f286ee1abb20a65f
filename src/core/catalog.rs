//! RB-003: Catalog store (load once, read-only lookups afterwards).
//!
//! Accepts the raw `recipes.json` document:
//! - `recipes` must be a mapping (id → recipe) or a sequence of recipes
//! - Source order is preserved and defines the default recipe
//! - Recipes whose `for_people` is not in `1..=u32::MAX` are excluded and
//!   reported, so every kept recipe passes the scaling guard
//! - Duplicate ids are a malformed catalog, excluded entries included

use super::error::{Error, Result};
use super::scaling::people_base;
use super::types::{Recipe, RecipeId};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// A recipe dropped at load time because it cannot be scaled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedRecipe {
    pub id: RecipeId,
    pub for_people: i64,
}

impl fmt::Display for ExcludedRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "recipe '{}' excluded: for_people is {} (must be between 1 and {})",
            self.id,
            self.for_people,
            u32::MAX
        )
    }
}

/// Immutable id → recipe mapping in source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: IndexMap<RecipeId, Recipe>,
    excluded: Vec<ExcludedRecipe>,
}

/// Read and load a catalog file from disk.
pub fn load_catalog_file(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("failed to read {}", path.display()), e))?;
    let catalog = parse_catalog(&content)?;
    info!(
        path = %path.display(),
        recipes = catalog.len(),
        excluded = catalog.excluded().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Load a catalog from a JSON string.
pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let data: Value = serde_json::from_str(json)
        .map_err(|e| Error::MalformedCatalog(format!("JSON parse error: {}", e)))?;
    Catalog::load(&data)
}

impl Catalog {
    /// Populate a catalog from the raw data-source structure.
    pub fn load(data: &Value) -> Result<Self> {
        let raw = data
            .get("recipes")
            .ok_or_else(|| Error::MalformedCatalog("missing 'recipes' collection".to_string()))?;

        let entries: Vec<(Option<&str>, &Value)> = match raw {
            Value::Object(map) => map.iter().map(|(k, v)| (Some(k.as_str()), v)).collect(),
            Value::Array(items) => items.iter().map(|v| (None, v)).collect(),
            other => {
                return Err(Error::MalformedCatalog(format!(
                    "'recipes' must be a mapping or sequence, got {}",
                    value_kind(other)
                )))
            }
        };

        let mut catalog = Self::default();
        for (position, (key, value)) in entries.into_iter().enumerate() {
            let recipe = parse_entry(key, value).map_err(|e| {
                Error::MalformedCatalog(format!(
                    "recipe #{} ({}): {}",
                    position,
                    key.unwrap_or("-"),
                    e
                ))
            })?;

            if catalog.contains(recipe.id.as_str())
                || catalog.excluded.iter().any(|e| e.id == recipe.id)
            {
                return Err(Error::MalformedCatalog(format!(
                    "duplicate recipe id '{}'",
                    recipe.id
                )));
            }

            if people_base(&recipe).is_err() {
                warn!(
                    id = %recipe.id,
                    for_people = recipe.for_people,
                    "excluding recipe with unusable for_people"
                );
                catalog.excluded.push(ExcludedRecipe {
                    id: recipe.id,
                    for_people: recipe.for_people,
                });
                continue;
            }

            debug!(id = %recipe.id, title = %recipe.title, "recipe loaded");
            catalog.recipes.insert(recipe.id.clone(), recipe);
        }

        Ok(catalog)
    }

    /// Exact-match lookup.
    pub fn get(&self, id: &str) -> Result<&Recipe> {
        self.recipes
            .get(id)
            .ok_or_else(|| Error::NotFound(RecipeId::new(id)))
    }

    /// First recipe in load order.
    pub fn first_recipe(&self) -> Result<&Recipe> {
        self.recipes
            .first()
            .map(|(_, recipe)| recipe)
            .ok_or(Error::EmptyCatalog)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.recipes.contains_key(id)
    }

    /// Recipes in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipes dropped at load time.
    pub fn excluded(&self) -> &[ExcludedRecipe] {
        &self.excluded
    }
}

/// Deserialize one entry. Mapping entries without an `id` take their key.
fn parse_entry(
    key: Option<&str>,
    value: &Value,
) -> std::result::Result<Recipe, serde_json::Error> {
    match (key, value) {
        (Some(key), Value::Object(fields)) if !fields.contains_key("id") => {
            let mut fields = fields.clone();
            fields.insert("id".to_string(), Value::String(key.to_string()));
            serde_json::from_value(Value::Object(fields))
        }
        _ => Recipe::deserialize(value),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
  "recipes": [
    {
      "id": 1,
      "title": "Pancakes",
      "description": "Fluffy pancakes for a slow weekend breakfast with the family.",
      "thumb_img": "pancakes-thumb.jpg",
      "full_img": "pancakes.jpg",
      "for_people": 4,
      "ingredients": [{"quantity": 2, "unit": "cups", "name": "flour"}],
      "instructions": [{"description": "Mix", "order": 1}]
    },
    {
      "id": 2,
      "title": "Omelette",
      "description": "Quick omelette",
      "thumb_img": "omelette-thumb.jpg",
      "for_people": 1,
      "ingredients": [],
      "instructions": []
    }
  ]
}"#;

    #[test]
    fn test_rb003_load_sequence() {
        let catalog = parse_catalog(CATALOG_JSON).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.first_recipe().unwrap().title, "Pancakes");
        assert_eq!(catalog.get("2").unwrap().title, "Omelette");
    }

    #[test]
    fn test_rb003_load_mapping_preserves_order() {
        let json = r#"{"recipes": {
            "zucchini": {"title": "Z", "thumb_img": "z.jpg", "for_people": 2},
            "apple": {"title": "A", "thumb_img": "a.jpg", "for_people": 2}
        }}"#;
        let catalog = parse_catalog(json).unwrap();
        let ids: Vec<_> = catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["zucchini", "apple"]);
        assert_eq!(catalog.first_recipe().unwrap().title, "Z");
    }

    #[test]
    fn test_rb003_mapping_entry_keeps_explicit_id() {
        let json = r#"{"recipes": {
            "0": {"id": 11, "title": "A", "thumb_img": "a.jpg", "for_people": 2}
        }}"#;
        let catalog = parse_catalog(json).unwrap();
        assert!(catalog.contains("11"));
        assert!(!catalog.contains("0"));
    }

    #[test]
    fn test_rb003_missing_recipes() {
        let err = parse_catalog(r#"{"dishes": []}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedCatalog(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_rb003_recipes_wrong_kind() {
        let err = parse_catalog(r#"{"recipes": "nope"}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedCatalog(ref m) if m.contains("a string")));
    }

    #[test]
    fn test_rb003_invalid_json() {
        let err = parse_catalog("{not json").unwrap_err();
        assert!(matches!(err, Error::MalformedCatalog(_)));
    }

    #[test]
    fn test_rb003_bad_entry_is_malformed() {
        let err = parse_catalog(r#"{"recipes": [{"id": 1, "title": "No thumb"}]}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedCatalog(ref m) if m.contains("recipe #0")));
    }

    #[test]
    fn test_rb003_duplicate_id() {
        let json = r#"{"recipes": [
            {"id": 1, "title": "A", "thumb_img": "a.jpg", "for_people": 2},
            {"id": "1", "title": "B", "thumb_img": "b.jpg", "for_people": 2}
        ]}"#;
        let err = parse_catalog(json).unwrap_err();
        assert!(err.to_string().contains("duplicate recipe id '1'"));
    }

    #[test]
    fn test_rb003_excludes_non_positive_people() {
        let json = r#"{"recipes": [
            {"id": 1, "title": "Zero", "thumb_img": "a.jpg", "for_people": 0},
            {"id": 2, "title": "Negative", "thumb_img": "b.jpg", "for_people": -3},
            {"id": 3, "title": "Fine", "thumb_img": "c.jpg", "for_people": 2}
        ]}"#;
        let catalog = parse_catalog(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.first_recipe().unwrap().title, "Fine");
        assert_eq!(catalog.excluded().len(), 2);
        assert_eq!(catalog.excluded()[1].for_people, -3);
        assert!(catalog.excluded()[0].to_string().contains("excluded"));
    }

    #[test]
    fn test_rb003_excludes_people_beyond_divisor_range() {
        let json = r#"{"recipes": [
            {"id": 1, "title": "Banquet", "thumb_img": "a.jpg", "for_people": 5000000000},
            {"id": 2, "title": "Fine", "thumb_img": "b.jpg", "for_people": 2}
        ]}"#;
        let catalog = parse_catalog(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.first_recipe().unwrap().title, "Fine");
        assert_eq!(catalog.excluded()[0].for_people, 5_000_000_000);
        assert!(catalog.excluded()[0].to_string().contains("4294967295"));
        for recipe in catalog.iter() {
            assert!(people_base(recipe).is_ok());
        }
    }

    #[test]
    fn test_rb003_duplicate_of_excluded_id() {
        let json = r#"{"recipes": [
            {"id": 1, "title": "Zero", "thumb_img": "a.jpg", "for_people": 0},
            {"id": 1, "title": "Fine", "thumb_img": "b.jpg", "for_people": 2}
        ]}"#;
        let err = parse_catalog(json).unwrap_err();
        assert!(matches!(err, Error::MalformedCatalog(ref m) if m.contains("duplicate recipe id '1'")));
    }

    #[test]
    fn test_rb003_empty_catalog() {
        let catalog = parse_catalog(r#"{"recipes": []}"#).unwrap();
        assert!(catalog.is_empty());
        assert!(matches!(catalog.first_recipe(), Err(Error::EmptyCatalog)));
    }

    #[test]
    fn test_rb003_get_not_found() {
        let catalog = parse_catalog(CATALOG_JSON).unwrap();
        match catalog.get("99") {
            Err(Error::NotFound(id)) => assert_eq!(id.as_str(), "99"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_rb003_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        std::fs::write(&path, CATALOG_JSON).unwrap();
        let catalog = load_catalog_file(&path).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_rb003_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog_file(&dir.path().join("ghost.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
