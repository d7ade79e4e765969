//! Error type shared by the library.
//!
//! The binary wraps these in `anyhow` with context; callers of the library
//! can match on the variants directly.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The input record contained something other than strings and integers,
    /// or was not shaped like `{"data": [...]}`.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A running sum (`int_sum`, a cook time or an ingredient quantity) left
    /// its integer range.
    #[error("integer sum overflowed")]
    Overflow,

    /// Nothing was left of a handwritten recipe name after cleanup.
    #[error("invalid recipe name: {input:?}")]
    InvalidRecipeName { input: String },

    /// Recipe and ingredient names share one namespace.
    #[error("an entry named {name:?} already exists")]
    DuplicateEntry { name: String },

    #[error("recipe {recipe:?} lists {item:?} more than once")]
    DuplicateRequiredItem { recipe: String, item: String },

    #[error("recipe {name:?} not found")]
    RecipeNotFound { name: String },

    #[error("{name:?} is an ingredient, not a recipe")]
    NotARecipe { name: String },

    #[error("recipe {recipe:?} requires {item:?}, which is not in the cookbook")]
    MissingItem { recipe: String, item: String },

    #[error("recipe {name:?} requires itself")]
    RecipeCycle { name: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Error {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
