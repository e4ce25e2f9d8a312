//! Domain models for recipe management.
//!
//! This module contains the recipe data types, the ratio calculation used to
//! rescale ingredient quantities, and the server configuration.

/// Recipe, ingredient and step types.
pub mod recipe;
pub use recipe::{Illustration, Ingredient, Recipe, Step};

mod ratio;
pub use ratio::RatioError;

mod config;
pub use config::{Config, ConfigError};
