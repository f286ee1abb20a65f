//! Plain-text renderer for the terminal.

use super::Renderer;
use crate::core::error::{Error, Result};
use crate::core::view::{RecipeCard, RecipeDetail};
use std::io::Write;

/// Writes view models as plain text to any writer (stdout in the CLI).
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn write_err(e: std::io::Error) -> Error {
    Error::io("cannot write output", e)
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render_nav(&mut self, cards: &[RecipeCard]) -> Result<()> {
        writeln!(self.out, "Recipes ({})", cards.len()).map_err(write_err)?;
        for card in cards {
            let marker = if card.active { '*' } else { ' ' };
            writeln!(
                self.out,
                "{} [{}] {} - {} ({})",
                marker, card.id, card.title, card.description, card.people
            )
            .map_err(write_err)?;
        }
        writeln!(self.out).map_err(write_err)
    }

    fn render_detail(&mut self, detail: &RecipeDetail) -> Result<()> {
        let out = &mut self.out;
        writeln!(out, "{}", detail.title).map_err(write_err)?;
        writeln!(out, "{}", "=".repeat(detail.title.chars().count())).map_err(write_err)?;
        writeln!(out, "image: {}", detail.image).map_err(write_err)?;
        writeln!(out, "{}", detail.description).map_err(write_err)?;
        writeln!(out).map_err(write_err)?;
        writeln!(out, "Ingredients for {} people:", detail.people).map_err(write_err)?;
        for line in &detail.ingredients {
            writeln!(out, "  - {}", line).map_err(write_err)?;
        }
        writeln!(out).map_err(write_err)?;
        writeln!(out, "Instructions:").map_err(write_err)?;
        for (i, step) in detail.instructions.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, step).map_err(write_err)?;
        }
        writeln!(out).map_err(write_err)
    }

    fn render_notice(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "! {}", message).map_err(write_err)
    }
}
