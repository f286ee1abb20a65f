//! RB-010: CLI subcommands (init, validate, list, show, render, session).

use crate::core::catalog;
use crate::core::config::{self, BookConfig, CONFIG_FILE};
use crate::core::error::{Error, Result};
use crate::render::html::{HtmlRenderer, PageFile};
use crate::render::text::TextRenderer;
use crate::render::{Both, Renderer};
use crate::session::Session;
use clap::Subcommand;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a recipebook.yaml, sample catalog and page skeleton
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Check the config and catalog without rendering
    Validate {
        /// Catalog file (overrides the config)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List every recipe as a navigation card
    List {
        /// Catalog file (overrides the config)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show one recipe, optionally scaled for a number of people
    Show {
        /// Recipe id (default: first recipe)
        #[arg(short, long)]
        id: Option<String>,

        /// Target number of people
        #[arg(short, long)]
        people: Option<String>,

        /// Print the view model as JSON
        #[arg(long)]
        json: bool,

        /// Catalog file (overrides the config)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Fill the page skeleton and write HTML
    Render {
        /// Recipe id (default: first recipe)
        #[arg(short, long)]
        id: Option<String>,

        /// Target number of people
        #[arg(short, long)]
        people: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Catalog file (overrides the config)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Interactive session reading commands from stdin
    Session {
        /// Also rewrite this HTML page after every rendered view
        #[arg(long)]
        html: Option<PathBuf>,

        /// Catalog file (overrides the config)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        Commands::Validate { catalog } => {
            cmd_validate(&load_and_validate(config_path, catalog)?)
        }
        Commands::List { catalog } => cmd_list(&load_and_validate(config_path, catalog)?),
        Commands::Show {
            id,
            people,
            json,
            catalog,
        } => cmd_show(
            &load_and_validate(config_path, catalog)?,
            id.as_deref(),
            people.as_deref(),
            json,
        ),
        Commands::Render {
            id,
            people,
            output,
            catalog,
        } => cmd_render(
            &load_and_validate(config_path, catalog)?,
            id.as_deref(),
            people.as_deref(),
            output.as_deref(),
        ),
        Commands::Session { html, catalog } => cmd_session(
            &load_and_validate(config_path, catalog)?,
            html.as_deref(),
        ),
    }
}

const SAMPLE_CONFIG: &str = r#"version: "1.0"
image_base: assets/images/
catalog: assets/data/recipes.json
skeleton: template/recipe-detail.html
"#;

const SAMPLE_CATALOG: &str = r#"{
  "recipes": [
    {
      "id": 1,
      "title": "Pancakes",
      "description": "Thick, fluffy buttermilk pancakes for a slow weekend breakfast.",
      "thumb_img": "pancakes-thumb.jpg",
      "full_img": "pancakes.jpg",
      "for_people": 4,
      "ingredients": [
        { "quantity": 2, "unit": "cups", "name": "flour" },
        { "quantity": 1.5, "unit": "cups", "name": "buttermilk" },
        { "quantity": 2, "unit": "", "name": "eggs" }
      ],
      "instructions": [
        { "description": "Whisk the dry ingredients.", "order": 1 },
        { "description": "Cook on a hot griddle until golden.", "order": 3 },
        { "description": "Fold in buttermilk and eggs.", "order": 2 }
      ]
    },
    {
      "id": 2,
      "title": "Tomato soup",
      "description": "Roasted tomato soup.",
      "thumb_img": "soup-thumb.jpg",
      "for_people": 2,
      "ingredients": [
        { "quantity": 800, "unit": "g", "name": "tomatoes" },
        { "quantity": 0.5, "unit": "l", "name": "stock" }
      ],
      "instructions": [
        { "description": "Roast the tomatoes.", "order": 1 },
        { "description": "Blend with stock and simmer.", "order": 2 }
      ]
    }
  ]
}
"#;

const SAMPLE_SKELETON: &str = r#"<!DOCTYPE html>
<html>
<body>
  <nav><ul id="recipes-nav">
{{recipe.nav}}
  </ul></nav>
  <main id="recipeDetail" data-recipe="{{recipe.id}}">
    <h1 id="recipeTitle">{{recipe.title}}</h1>
    <img id="recipeFullImage" src="{{recipe.image}}" alt="">
    <p id="recipeDescriptionText">{{recipe.description}}</p>
    <p>Ingredients for <span id="recipeForPeople">{{recipe.people}}</span> people</p>
    <ul id="recipeIngredientLists">
{{recipe.ingredients}}
    </ul>
    <ol id="listRecipeIngredients">
{{recipe.instructions}}
    </ol>
  </main>
</body>
</html>
"#;

fn write_new(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::io(format!("cannot create dir {}", parent.display()), e))?;
    }
    std::fs::write(path, content)
        .map_err(|e| Error::io(format!("cannot write {}", path.display()), e))
}

fn cmd_init(path: &Path) -> Result<()> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        return Err(Error::Config(format!(
            "{} already exists",
            config_path.display()
        )));
    }

    let defaults = BookConfig::default();
    let catalog_path = path.join(&defaults.catalog);
    let skeleton_path = path.join(&defaults.skeleton);

    write_new(&config_path, SAMPLE_CONFIG)?;
    if !catalog_path.exists() {
        write_new(&catalog_path, SAMPLE_CATALOG)?;
    }
    if !skeleton_path.exists() {
        write_new(&skeleton_path, SAMPLE_SKELETON)?;
    }

    println!("Initialized recipebook at {}", path.display());
    println!("  Created: {}", config_path.display());
    println!("  Catalog: {}", catalog_path.display());
    println!("  Skeleton: {}", skeleton_path.display());
    Ok(())
}

/// Load the config, apply the catalog override and reject invalid configs.
fn load_and_validate(
    config_path: Option<&Path>,
    catalog: Option<PathBuf>,
) -> Result<BookConfig> {
    let mut config = config::load_config(config_path)?;
    if let Some(catalog) = catalog {
        config.catalog = catalog;
    }
    let errors = config::validate_config(&config);
    if errors.is_empty() {
        return Ok(config);
    }
    for e in &errors {
        eprintln!("  ERROR: {}", e);
    }
    Err(Error::Config(format!("{} validation error(s)", errors.len())))
}

fn cmd_validate(config: &BookConfig) -> Result<()> {
    let catalog = catalog::load_catalog_file(&config.catalog)?;

    for excluded in catalog.excluded() {
        eprintln!("  ERROR: {}", excluded);
    }
    if catalog.is_empty() {
        return Err(Error::EmptyCatalog);
    }
    if !catalog.excluded().is_empty() {
        return Err(Error::Config(format!(
            "{} recipe(s) excluded",
            catalog.excluded().len()
        )));
    }

    println!(
        "OK: {} ({} recipes)",
        config.catalog.display(),
        catalog.len()
    );
    Ok(())
}

fn cmd_list(config: &BookConfig) -> Result<()> {
    let session = Session::start(config)?;
    let mut renderer = TextRenderer::new(std::io::stdout().lock());
    renderer.render_nav(&session.engine().cards())
}

/// Start a session and apply one-shot selection and override flags.
fn start_with(config: &BookConfig, id: Option<&str>, people: Option<&str>) -> Result<Session> {
    let mut session = Session::start(config)?;
    if let Some(id) = id {
        session.engine_mut().select_recipe(id)?;
    }
    if let Some(people) = people {
        session.engine_mut().set_override(people)?;
    }
    Ok(session)
}

fn cmd_show(
    config: &BookConfig,
    id: Option<&str>,
    people: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut session = start_with(config, id, people)?;
    if json {
        let detail = session.engine_mut().detail()?;
        println!("{}", serde_json::to_string_pretty(&detail).map_err(Error::Serialize)?);
        return Ok(());
    }
    let mut renderer = TextRenderer::new(std::io::stdout().lock());
    let detail = session.engine_mut().detail()?;
    renderer.render_detail(&detail)
}

fn cmd_render(
    config: &BookConfig,
    id: Option<&str>,
    people: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let mut session = start_with(config, id, people)?;
    let mut renderer = HtmlRenderer::new(session.skeleton().clone());
    session.render(&mut renderer)?;
    let page = renderer.finish()?;

    match output {
        Some(path) => {
            write_new(path, &page)?;
            info!(path = %path.display(), bytes = page.len(), "page written");
        }
        None => print!("{}", page),
    }
    Ok(())
}

fn cmd_session(config: &BookConfig, html: Option<&Path>) -> Result<()> {
    let mut session = Session::start(config)?;
    let stdin = std::io::stdin();
    let mut text = TextRenderer::new(std::io::stdout().lock());
    let result = match html {
        Some(path) => {
            let page = PageFile::new(session.skeleton().clone(), path);
            run_session(&mut session, stdin.lock(), &mut Both(text, page))
        }
        None => run_session(&mut session, stdin.lock(), &mut text),
    };
    if let Err(ref e) = result {
        warn!(error = %e, "session aborted");
    }
    result
}

fn run_session<R: BufRead>(
    session: &mut Session,
    input: R,
    renderer: &mut dyn Renderer,
) -> Result<()> {
    renderer.render_notice(crate::session::event::HELP)?;
    session.run(input, renderer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_project() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        cmd_init(dir.path()).unwrap();
        let config = dir.path().join(CONFIG_FILE);
        (dir, config)
    }

    #[test]
    fn test_rb010_init() {
        let (dir, _) = init_project();
        assert!(dir.path().join(CONFIG_FILE).exists());
        assert!(dir.path().join("assets/data/recipes.json").exists());
        assert!(dir.path().join("template/recipe-detail.html").exists());
    }

    #[test]
    fn test_rb010_init_already_exists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "exists").unwrap();
        assert!(cmd_init(dir.path()).is_err());
    }

    #[test]
    fn test_rb010_sample_files_are_valid() {
        let catalog = catalog::parse_catalog(SAMPLE_CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.excluded().is_empty());
        crate::render::html::Skeleton::parse(SAMPLE_SKELETON).unwrap();
        let config = config::parse_config(SAMPLE_CONFIG).unwrap();
        assert!(config::validate_config(&config).is_empty());
    }

    #[test]
    fn test_rb010_validate_ok() {
        let (_dir, config_path) = init_project();
        let config = load_and_validate(Some(&config_path), None).unwrap();
        cmd_validate(&config).unwrap();
    }

    #[test]
    fn test_rb010_validate_excluded_recipe() {
        let (dir, config_path) = init_project();
        let bad = dir.path().join("bad.json");
        std::fs::write(
            &bad,
            r#"{"recipes": [{"id": 1, "title": "X", "thumb_img": "x.jpg", "for_people": 0}]}"#,
        )
        .unwrap();
        let config = load_and_validate(Some(&config_path), Some(bad)).unwrap();
        assert!(matches!(cmd_validate(&config), Err(Error::EmptyCatalog)));
    }

    #[test]
    fn test_rb010_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "version: \"9\"\nimage_base: img\n").unwrap();
        let err = load_and_validate(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("2 validation error(s)"));
    }

    #[test]
    fn test_rb010_show_scaled() {
        let (_dir, config_path) = init_project();
        let config = load_and_validate(Some(&config_path), None).unwrap();
        cmd_show(&config, Some("2"), Some("4"), false).unwrap();
        cmd_show(&config, None, None, true).unwrap();
    }

    #[test]
    fn test_rb010_show_rejects_bad_input() {
        let (_dir, config_path) = init_project();
        let config = load_and_validate(Some(&config_path), None).unwrap();
        assert!(matches!(
            cmd_show(&config, Some("nope"), None, false),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            cmd_show(&config, None, Some("zero"), false),
            Err(Error::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_rb010_render_to_file() {
        let (dir, config_path) = init_project();
        let config = load_and_validate(Some(&config_path), None).unwrap();
        let out = dir.path().join("out/index.html");
        cmd_render(&config, Some("1"), Some("8"), Some(&out)).unwrap();
        let page = std::fs::read_to_string(&out).unwrap();
        assert!(page.contains("<li>4.00 cups flour</li>"));
        assert!(page.contains("<li>4.00  eggs</li>"));
        assert!(page.contains(r#"src="assets/images/pancakes.jpg""#));
        assert_eq!(page.matches("card--active").count(), 1);
        let whisk = page.find("Whisk").unwrap();
        let fold = page.find("Fold in").unwrap();
        let cook = page.find("Cook on").unwrap();
        assert!(whisk < fold && fold < cook);
    }

    #[test]
    fn test_rb010_session_rewrites_page() {
        let (dir, config_path) = init_project();
        let config = load_and_validate(Some(&config_path), None).unwrap();
        let mut session = Session::start(&config).unwrap();
        let out = dir.path().join("live.html");
        let page = PageFile::new(session.skeleton().clone(), &out);
        let mut renderer = Both(TextRenderer::new(Vec::new()), page);
        run_session(&mut session, "select 2\npeople 0\n".as_bytes(), &mut renderer).unwrap();

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("Tomato soup"));
        assert_eq!(html.matches("card--active").count(), 1);
        let text = String::from_utf8(renderer.0.into_inner()).unwrap();
        assert!(text.contains("Please enter a valid number"));
    }

    #[test]
    fn test_rb010_list() {
        let (_dir, config_path) = init_project();
        let config = load_and_validate(Some(&config_path), None).unwrap();
        cmd_list(&config).unwrap();
    }
}
