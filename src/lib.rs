//! Recipe Manager
//!
//! Recipes are JSON documents stored in a directory. They are loaded once at
//! startup and served read-only over HTTP, with optional rescaling of
//! ingredient quantities.

pub mod domain;
pub use domain::{Config, Ingredient, RatioError, Recipe};

pub mod storage;
pub use storage::{Directory, LoadError, RecipeNotFound, RecipeRepository};

pub mod catalog;
pub use catalog::{Catalog, GetRecipeError};

pub mod server;
