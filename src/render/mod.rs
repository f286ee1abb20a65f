//! RB-008: Renderer abstraction (terminal text and HTML skeleton output).
//!
//! The engine builds view models; a renderer only decides how they look.

pub mod html;
pub mod text;

use crate::core::error::Result;
use crate::core::view::{RecipeCard, RecipeDetail};

/// Consumer of engine view models.
pub trait Renderer {
    /// Navigation list, one card per recipe in catalog order.
    fn render_nav(&mut self, cards: &[RecipeCard]) -> Result<()>;

    /// Detail pane for the effective recipe.
    fn render_detail(&mut self, detail: &RecipeDetail) -> Result<()>;

    /// User-facing message after a rejected action.
    fn render_notice(&mut self, message: &str) -> Result<()> {
        tracing::info!(notice = message, "notice");
        Ok(())
    }
}

/// Sends every call to two renderers, first to last.
pub struct Both<A, B>(pub A, pub B);

impl<A: Renderer, B: Renderer> Renderer for Both<A, B> {
    fn render_nav(&mut self, cards: &[RecipeCard]) -> Result<()> {
        self.0.render_nav(cards)?;
        self.1.render_nav(cards)
    }

    fn render_detail(&mut self, detail: &RecipeDetail) -> Result<()> {
        self.0.render_detail(detail)?;
        self.1.render_detail(detail)
    }

    fn render_notice(&mut self, message: &str) -> Result<()> {
        self.0.render_notice(message)?;
        self.1.render_notice(message)
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
