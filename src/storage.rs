//! Read-only recipe storage.
//!
//! Recipes are loaded once from a directory of JSON files into a
//! [`Directory`], and queried through the [`RecipeRepository`] trait.

use std::collections::HashSet;

use crate::domain::Recipe;

mod directory;
pub use directory::{Directory, LoadError};

/// The requested recipe identifier is not in the repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("recipe '{0}' not found")]
pub struct RecipeNotFound(pub String);

/// Read-only queries over a set of recipes.
pub trait RecipeRepository {
    /// Look up a recipe by its exact identifier.
    ///
    /// The returned recipe is an owned copy; changing it has no effect on the
    /// repository.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeNotFound`] if no recipe has this identifier.
    fn find_by_id(&self, id: &str) -> Result<Recipe, RecipeNotFound>;

    /// Iterate over every stored recipe.
    fn recipes(&self) -> impl Iterator<Item = &Recipe>;

    /// List recipes, optionally keeping only those that use an ingredient.
    ///
    /// The filter is an exact, case-sensitive match on the ingredient name.
    /// `None` and `Some("")` both return every recipe. Callers must not rely
    /// on the order of the result.
    fn list_all(&self, ingredient: Option<&str>) -> Vec<Recipe> {
        match ingredient.filter(|name| !name.is_empty()) {
            Some(name) => self
                .recipes()
                .filter(|recipe| recipe.has_ingredient(name))
                .cloned()
                .collect(),
            None => self.recipes().cloned().collect(),
        }
    }

    /// Every ingredient name used by any recipe, each listed once, in order of
    /// first appearance.
    fn ingredient_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.recipes()
            .flat_map(|recipe| &recipe.ingredients)
            .filter(|ingredient| seen.insert(ingredient.name.as_str()))
            .map(|ingredient| ingredient.name.clone())
            .collect()
    }
}
