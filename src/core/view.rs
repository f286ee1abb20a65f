//! RB-005: View-model builders consumed by renderers.
//!
//! Everything here is pure: a recipe (plus the engine's people count) goes
//! in, display-ready strings come out.

use super::catalog::Catalog;
use super::error::Result;
use super::scaling;
use super::types::{Instruction, Recipe, RecipeId};
use serde::Serialize;

/// Card descriptions longer than this are cut.
pub const DESCRIPTION_LIMIT: usize = 45;

const ELLIPSIS: &str = "...";

/// Everything the detail pane shows for one recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetail {
    pub id: RecipeId,
    pub title: String,
    pub image: String,
    pub description: String,
    pub people: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// One entry of the navigation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeCard {
    pub id: RecipeId,
    pub title: String,
    pub thumb: String,
    pub description: String,
    pub people: String,
    pub active: bool,
}

/// Hard cut at [`DESCRIPTION_LIMIT`] characters, no word-boundary handling.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_LIMIT {
        let mut cut: String = description.chars().take(DESCRIPTION_LIMIT).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        description.to_string()
    }
}

/// Full image when the recipe has one, thumbnail otherwise.
pub fn resolve_image(recipe: &Recipe, image_base: &str) -> String {
    let file = recipe.full_img.as_deref().unwrap_or(&recipe.thumb_img);
    format!("{}{}", image_base, file)
}

pub fn resolve_thumb(recipe: &Recipe, image_base: &str) -> String {
    format!("{}{}", image_base, recipe.thumb_img)
}

/// Stable ascending sort by `order`; equal orders keep source position.
pub fn sort_instructions(instructions: &[Instruction]) -> Vec<&Instruction> {
    let mut sorted: Vec<&Instruction> = instructions.iter().collect();
    sorted.sort_by(|a, b| a.order.cmp(&b.order));
    sorted
}

/// Instruction descriptions in display order.
pub fn instruction_lines(instructions: &[Instruction]) -> Vec<String> {
    sort_instructions(instructions)
        .into_iter()
        .map(|i| i.description.clone())
        .collect()
}

/// Render a people count the way the calculator shows it (`8`, `2.5`).
pub fn format_people(count: f64) -> String {
    format!("{}", count)
}

/// Build the detail view for `recipe` at `people` servings.
///
/// `target_people` is the active override; `None` prints stored quantities.
pub fn recipe_detail(
    recipe: &Recipe,
    people: f64,
    target_people: Option<f64>,
    image_base: &str,
) -> Result<RecipeDetail> {
    Ok(RecipeDetail {
        id: recipe.id.clone(),
        title: recipe.title.clone(),
        image: resolve_image(recipe, image_base),
        description: recipe.description.clone(),
        people: format_people(people),
        ingredients: scaling::ingredient_lines(recipe, target_people)?,
        instructions: instruction_lines(&recipe.instructions),
    })
}

/// Navigation cards for every recipe, in catalog order.
pub fn recipe_cards(
    catalog: &Catalog,
    active: Option<&RecipeId>,
    image_base: &str,
) -> Vec<RecipeCard> {
    catalog
        .iter()
        .map(|recipe| RecipeCard {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            thumb: resolve_thumb(recipe, image_base),
            description: truncate_description(&recipe.description),
            people: format!("{} people", recipe.for_people),
            active: active == Some(&recipe.id),
        })
        .collect()
}
