//! RB-006: Selection & scaling engine.
//!
//! Owns the session state: which recipe is shown and the calculator
//! override. Two states, `NoSelection` and `Selected`; the override only
//! exists inside `Selected` and is cleared on every selection.

use super::catalog::Catalog;
use super::error::{Error, Result};
use super::scaling;
use super::types::{Recipe, RecipeId};
use super::view::{self, RecipeCard, RecipeDetail};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
enum Selection {
    NoSelection,
    Selected {
        id: RecipeId,
        /// Always positive and finite when present
        target_people: Option<f64>,
    },
}

/// Session state over an immutable catalog.
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
    image_base: String,
    selection: Selection,
}

impl Engine {
    pub fn new(catalog: Catalog, image_base: impl Into<String>) -> Self {
        Self {
            catalog,
            image_base: image_base.into(),
            selection: Selection::NoSelection,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn image_base(&self) -> &str {
        &self.image_base
    }

    /// Back to `NoSelection`; the next query picks the default recipe again.
    pub fn reset(&mut self) {
        debug!("selection reset");
        self.selection = Selection::NoSelection;
    }

    /// Explicitly selected recipe, if any.
    pub fn selected_id(&self) -> Option<&RecipeId> {
        match &self.selection {
            Selection::Selected { id, .. } => Some(id),
            Selection::NoSelection => None,
        }
    }

    /// Active calculator override.
    pub fn target_people(&self) -> Option<f64> {
        match self.selection {
            Selection::Selected { target_people, .. } => target_people,
            Selection::NoSelection => None,
        }
    }

    /// Select a recipe and clear the override.
    ///
    /// Unknown ids return `NotFound` and leave the state untouched.
    pub fn select_recipe(&mut self, id: &str) -> Result<&Recipe> {
        let recipe = self.catalog.get(id)?;
        info!(id = %recipe.id, title = %recipe.title, "recipe selected");
        self.selection = Selection::Selected {
            id: recipe.id.clone(),
            target_people: None,
        };
        self.current()
    }

    /// Apply a calculator submission.
    ///
    /// Invalid input returns `InvalidQuantity` and keeps the previous
    /// override. With nothing selected the default recipe is selected first.
    pub fn set_override(&mut self, raw: &str) -> Result<f64> {
        let value = scaling::parse_people(raw).map_err(|reason| {
            debug!(input = raw, %reason, "calculator input rejected");
            Error::InvalidQuantity {
                input: raw.to_string(),
                reason,
            }
        })?;
        self.resolve()?;
        if let Selection::Selected { target_people, .. } = &mut self.selection {
            *target_people = Some(value);
        }
        info!(target_people = value, "serving override set");
        Ok(value)
    }

    /// The recipe on display, selecting the first one when nothing is chosen.
    pub fn effective_recipe(&mut self) -> Result<&Recipe> {
        self.resolve()?;
        self.current()
    }

    /// Override when present, otherwise the recipe's own serving count.
    pub fn effective_people_count(&mut self) -> Result<f64> {
        self.resolve()?;
        let recipe = self.current()?;
        Ok(self
            .target_people()
            .unwrap_or(recipe.for_people as f64))
    }

    /// Detail view model for the effective recipe.
    pub fn detail(&mut self) -> Result<RecipeDetail> {
        let people = self.effective_people_count()?;
        let recipe = self.current()?;
        view::recipe_detail(recipe, people, self.target_people(), &self.image_base)
    }

    /// Navigation cards with the effective recipe marked active.
    pub fn cards(&self) -> Vec<RecipeCard> {
        let active = self
            .selected_id()
            .or_else(|| self.catalog.first_recipe().ok().map(|r| &r.id));
        view::recipe_cards(&self.catalog, active, &self.image_base)
    }

    /// Move `NoSelection` to `Selected(first recipe)`.
    fn resolve(&mut self) -> Result<()> {
        if self.selection == Selection::NoSelection {
            let id = self.catalog.first_recipe()?.id.clone();
            debug!(id = %id, "defaulting to first recipe");
            self.selection = Selection::Selected {
                id,
                target_people: None,
            };
        }
        Ok(())
    }

    fn current(&self) -> Result<&Recipe> {
        match &self.selection {
            Selection::Selected { id, .. } => self.catalog.get(id.as_str()),
            Selection::NoSelection => self.catalog.first_recipe(),
        }
    }
}
