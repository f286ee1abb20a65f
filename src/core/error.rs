//! RB-002: Error taxonomy.

use super::types::RecipeId;
use std::fmt;
use thiserror::Error;

/// Result type alias for recipebook operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading, selecting, scaling or rendering.
#[derive(Error, Debug)]
pub enum Error {
    /// The data source has no usable `recipes` collection.
    #[error("malformed catalog: {0}")]
    MalformedCatalog(String),

    /// The catalog loaded but holds no recipes.
    #[error("catalog contains no recipes")]
    EmptyCatalog,

    /// No recipe with this id.
    #[error("recipe '{0}' not found")]
    NotFound(RecipeId),

    /// Calculator input was rejected.
    #[error("invalid quantity '{input}': {reason}")]
    InvalidQuantity {
        input: String,
        reason: QuantityRejection,
    },

    /// A recipe's default serving count cannot be scaled from.
    #[error("recipe '{id}' has invalid for_people {for_people} (must be between 1 and 4294967295)")]
    InvalidRecipe { id: RecipeId, for_people: i64 },

    #[error("config error: {0}")]
    Config(String),

    #[error("skeleton error: {0}")]
    Skeleton(String),

    /// A view model could not be written as JSON.
    #[error("serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Per-action failures leave the session usable; everything else is fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidQuantity { .. })
    }
}

/// Why a calculator input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityRejection {
    Blank,
    NotANumber,
    NotFinite,
    NotPositive,
}

impl fmt::Display for QuantityRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "value is blank"),
            Self::NotANumber => write!(f, "value is not a number"),
            Self::NotFinite => write!(f, "value is not finite"),
            Self::NotPositive => write!(f, "value must be greater than zero"),
        }
    }
}
