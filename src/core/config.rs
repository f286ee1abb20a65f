//! RB-007: recipebook.yaml parsing and validation.
//!
//! Every field is optional; a missing file means all defaults:
//! - `image_base`: prefix for every image path (must end in `/`)
//! - `catalog`: recipes JSON file
//! - `skeleton`: HTML page skeleton used by `render`
//!
//! Relative paths resolve against the directory holding the config file.

use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "recipebook.yaml";

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookConfig {
    /// Schema version (must be "1.0")
    #[serde(default = "default_version")]
    pub version: String,

    /// Prefix joined to every thumbnail and full image name
    #[serde(default = "default_image_base")]
    pub image_base: String,

    /// Recipe catalog (JSON)
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,

    /// HTML page skeleton
    #[serde(default = "default_skeleton")]
    pub skeleton: PathBuf,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_image_base() -> String {
    "assets/images/".to_string()
}

fn default_catalog() -> PathBuf {
    PathBuf::from("assets/data/recipes.json")
}

fn default_skeleton() -> PathBuf {
    PathBuf::from("template/recipe-detail.html")
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            image_base: default_image_base(),
            catalog: default_catalog(),
            skeleton: default_skeleton(),
        }
    }
}

impl BookConfig {
    /// Anchor relative file paths at `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.catalog.is_relative() {
            self.catalog = base.join(&self.catalog);
        }
        if self.skeleton.is_relative() {
            self.skeleton = base.join(&self.skeleton);
        }
        self
    }
}

/// Parse recipebook.yaml from a string.
pub fn parse_config(yaml: &str) -> Result<BookConfig> {
    serde_yaml_ng::from_str(yaml).map_err(|e| Error::Config(format!("YAML parse error: {}", e)))
}

/// Parse a config file from disk, resolving paths against its directory.
pub fn parse_config_file(path: &Path) -> Result<BookConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("failed to read {}", path.display()), e))?;
    let config = parse_config(&content)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_paths(base))
}

/// Load an explicit config file, or `recipebook.yaml` when present, or defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<BookConfig> {
    match explicit {
        Some(path) => parse_config_file(path),
        None => {
            let path = Path::new(CONFIG_FILE);
            if path.exists() {
                parse_config_file(path)
            } else {
                debug!("no {} found, using defaults", CONFIG_FILE);
                Ok(BookConfig::default())
            }
        }
    }
}

/// Validate a parsed config. Returns a list of errors (empty = valid).
pub fn validate_config(config: &BookConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.version != "1.0" {
        errors.push(ValidationError {
            message: format!("version must be \"1.0\", got \"{}\"", config.version),
        });
    }

    if config.image_base.is_empty() {
        errors.push(ValidationError {
            message: "image_base must not be empty".to_string(),
        });
    } else if !config.image_base.ends_with('/') {
        errors.push(ValidationError {
            message: format!("image_base '{}' must end with '/'", config.image_base),
        });
    }

    if config.catalog.as_os_str().is_empty() {
        errors.push(ValidationError {
            message: "catalog path must not be empty".to_string(),
        });
    }

    errors
}
