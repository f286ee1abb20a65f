//! HTML renderer: fills `{{recipe.*}}` placeholders in the page skeleton.
//!
//! Placeholders: `id`, `title`, `image`, `description`, `people`,
//! `ingredients`, `instructions`, `nav`. List placeholders expand to `<li>`
//! items; everything else is escaped text.

use super::{escape_html, Renderer};
use crate::core::error::{Error, Result};
use crate::core::view::{RecipeCard, RecipeDetail};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const OPEN: &str = "{{recipe.";
const CLOSE: &str = "}}";

const KEYS: &[&str] = &[
    "id",
    "title",
    "image",
    "description",
    "people",
    "ingredients",
    "instructions",
    "nav",
];

/// A validated page skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    source: String,
}

/// Read and validate a skeleton file.
pub fn load_skeleton(path: &Path) -> Result<Skeleton> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("failed to read skeleton {}", path.display()), e))?;
    let skeleton = Skeleton::parse(&source)?;
    info!(path = %path.display(), "skeleton loaded");
    Ok(skeleton)
}

impl Skeleton {
    /// Check that every placeholder is closed and known.
    pub fn parse(source: &str) -> Result<Self> {
        let mut start = 0;
        while let Some(open) = source[start..].find(OPEN) {
            let open = start + open;
            let close = source[open..]
                .find(CLOSE)
                .ok_or_else(|| Error::Skeleton(format!("unclosed placeholder at byte {}", open)))?;
            let key = source[open + OPEN.len()..open + close].trim();
            if !KEYS.contains(&key) {
                return Err(Error::Skeleton(format!("unknown placeholder 'recipe.{}'", key)));
            }
            start = open + close + CLOSE.len();
        }
        Ok(Self {
            source: source.to_string(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute every placeholder with the rendered view models.
    pub fn fill(&self, cards: &[RecipeCard], detail: &RecipeDetail) -> Result<String> {
        let mut result = self.source.clone();
        let mut start = 0;

        while let Some(open) = result[start..].find(OPEN) {
            let open = start + open;
            let close = result[open..]
                .find(CLOSE)
                .ok_or_else(|| Error::Skeleton(format!("unclosed placeholder at byte {}", open)))?;
            let close = open + close + CLOSE.len();
            let key = result[open + OPEN.len()..close - CLOSE.len()].trim();

            let value = match key {
                "id" => escape_html(detail.id.as_str()),
                "title" => escape_html(&detail.title),
                "image" => escape_html(&detail.image),
                "description" => escape_html(&detail.description),
                "people" => escape_html(&detail.people),
                "ingredients" => list_items(&detail.ingredients),
                "instructions" => list_items(&detail.instructions),
                "nav" => nav_items(cards),
                other => {
                    return Err(Error::Skeleton(format!(
                        "unknown placeholder 'recipe.{}'",
                        other
                    )))
                }
            };

            result.replace_range(open..close, &value);
            start = open + value.len();
        }

        Ok(result)
    }
}

fn list_items(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("<li>{}</li>", escape_html(line)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn nav_items(cards: &[RecipeCard]) -> String {
    cards.iter().map(card_html).collect::<Vec<_>>().join("\n")
}

fn card_html(card: &RecipeCard) -> String {
    let class = if card.active {
        "card card--active recipeNav__item"
    } else {
        "card recipeNav__item"
    };
    let id = escape_html(card.id.as_str());
    format!(
        r#"<li class="{class}" data-target="{id}" id="card-{id}">
  <img src="{thumb}" alt="" class="card-thumb">
  <div class="card-content">
    <h2 class="card-title">{title}</h2>
    <p class="card-description">{description}</p>
  </div>
  <div class="card-footer">
    <small>{people}</small>
  </div>
</li>"#,
        class = class,
        id = id,
        thumb = escape_html(&card.thumb),
        title = escape_html(&card.title),
        description = escape_html(&card.description),
        people = escape_html(&card.people),
    )
}

/// Collects one nav + detail pass and fills the skeleton on `finish`.
pub struct HtmlRenderer {
    skeleton: Skeleton,
    cards: Vec<RecipeCard>,
    detail: Option<RecipeDetail>,
}

impl HtmlRenderer {
    pub fn new(skeleton: Skeleton) -> Self {
        Self {
            skeleton,
            cards: Vec::new(),
            detail: None,
        }
    }

    /// The filled page. Requires a detail pass.
    pub fn finish(&self) -> Result<String> {
        let detail = self
            .detail
            .as_ref()
            .ok_or_else(|| Error::Skeleton("no recipe detail rendered".to_string()))?;
        self.skeleton.fill(&self.cards, detail)
    }
}

impl Renderer for HtmlRenderer {
    fn render_nav(&mut self, cards: &[RecipeCard]) -> Result<()> {
        self.cards = cards.to_vec();
        Ok(())
    }

    fn render_detail(&mut self, detail: &RecipeDetail) -> Result<()> {
        self.detail = Some(detail.clone());
        Ok(())
    }
}

/// Rewrites an HTML page on disk after every detail pass.
pub struct PageFile {
    renderer: HtmlRenderer,
    path: PathBuf,
}

impl PageFile {
    pub fn new(skeleton: Skeleton, path: impl Into<PathBuf>) -> Self {
        Self {
            renderer: HtmlRenderer::new(skeleton),
            path: path.into(),
        }
    }
}

impl Renderer for PageFile {
    fn render_nav(&mut self, cards: &[RecipeCard]) -> Result<()> {
        self.renderer.render_nav(cards)
    }

    fn render_detail(&mut self, detail: &RecipeDetail) -> Result<()> {
        self.renderer.render_detail(detail)?;
        let page = self.renderer.finish()?;
        std::fs::write(&self.path, &page)
            .map_err(|e| Error::io(format!("cannot write {}", self.path.display()), e))?;
        debug!(path = %self.path.display(), bytes = page.len(), "page rewritten");
        Ok(())
    }
}
