//! Use cases exposed to the HTTP layer.
//!
//! A [`Catalog`] wraps a [`RecipeRepository`] and combines lookups with
//! ingredient scaling.

use crate::{
    domain::{RatioError, Recipe},
    storage::{RecipeNotFound, RecipeRepository},
};

/// Errors returned by [`Catalog::get_recipe`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GetRecipeError {
    /// No recipe has the requested identifier.
    #[error(transparent)]
    NotFound(#[from] RecipeNotFound),

    /// The recipe exists but could not be scaled.
    #[error(transparent)]
    Ratio(#[from] RatioError),
}

/// Recipe queries backed by a repository.
#[derive(Debug)]
pub struct Catalog<R> {
    repository: R,
}

impl<R: RecipeRepository> Catalog<R> {
    /// Creates a catalog over `repository`.
    #[must_use]
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// The underlying repository.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Fetch a recipe, scaled so that `ingredient` amounts to `quantity`.
    ///
    /// An empty `ingredient` or a non-positive `quantity` returns the recipe
    /// as stored. Scaling always happens on a copy; the repository is never
    /// modified.
    ///
    /// # Errors
    ///
    /// - [`GetRecipeError::NotFound`] if `id` is unknown
    /// - [`GetRecipeError::Ratio`] if the recipe cannot be scaled by the
    ///   given constraint
    pub fn get_recipe(
        &self,
        id: &str,
        ingredient: &str,
        quantity: f64,
    ) -> Result<Recipe, GetRecipeError> {
        let mut recipe = self.repository.find_by_id(id)?;
        recipe.compute_ratios(ingredient, quantity)?;
        Ok(recipe)
    }

    /// List recipes, optionally only those using `ingredient`.
    #[must_use]
    pub fn list_recipes(&self, ingredient: Option<&str>) -> Vec<Recipe> {
        self.repository.list_all(ingredient)
    }

    /// Every distinct ingredient name across all recipes.
    #[must_use]
    pub fn list_ingredients(&self) -> Vec<String> {
        self.repository.ingredient_names()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::Ingredient;

    /// In-memory repository keyed by identifier.
    struct MockRepository {
        recipes: BTreeMap<String, Recipe>,
    }

    impl MockRepository {
        fn new(recipes: impl IntoIterator<Item = Recipe>) -> Self {
            Self {
                recipes: recipes.into_iter().map(|r| (r.id.clone(), r)).collect(),
            }
        }
    }

    impl RecipeRepository for MockRepository {
        fn find_by_id(&self, id: &str) -> Result<Recipe, RecipeNotFound> {
            self.recipes
                .get(id)
                .cloned()
                .ok_or_else(|| RecipeNotFound(id.to_string()))
        }

        fn recipes(&self) -> impl Iterator<Item = &Recipe> {
            self.recipes.values()
        }
    }

    fn recipe(id: &str, name: &str, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            ingredients,
            steps: Vec::new(),
        }
    }

    fn catalog() -> Catalog<MockRepository> {
        Catalog::new(MockRepository::new([
            recipe(
                "1",
                "Pancakes",
                vec![
                    Ingredient::new("Flour", 200.0, "grams"),
                    Ingredient::new("Milk", 300.0, "ml"),
                ],
            ),
            recipe("2", "Omelette", vec![Ingredient::new("Egg", 3.0, "pieces")]),
        ]))
    }

    #[test]
    fn get_recipe_without_constraint_returns_stored_recipe() {
        let catalog = catalog();

        let recipe = catalog.get_recipe("1", "", 0.0).unwrap();

        assert_eq!(recipe, catalog.repository().find_by_id("1").unwrap());
    }

    #[test]
    fn get_recipe_scales_a_copy() {
        let catalog = catalog();

        let scaled = catalog.get_recipe("1", "Flour", 400.0).unwrap();

        assert!((scaled.ingredients[1].quantity - 600.0).abs() < 1e-9);
        let stored = catalog.repository().find_by_id("1").unwrap();
        assert!((stored.ingredients[1].quantity - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn get_recipe_unknown_id() {
        let error = catalog().get_recipe("999", "", 0.0).unwrap_err();

        assert_eq!(
            error,
            GetRecipeError::NotFound(RecipeNotFound("999".to_string()))
        );
    }

    #[test]
    fn get_recipe_unknown_constraint() {
        let error = catalog().get_recipe("1", "Sugar", 100.0).unwrap_err();

        assert_eq!(
            error,
            GetRecipeError::Ratio(RatioError::ConstraintNotFound("Sugar".to_string()))
        );
        assert_eq!(error.to_string(), "ingredient constraint 'Sugar' not found in recipe");
    }

    #[test]
    fn list_recipes_with_and_without_filter() {
        let catalog = catalog();

        assert_eq!(catalog.list_recipes(None).len(), 2);

        let with_milk = catalog.list_recipes(Some("Milk"));
        assert_eq!(with_milk.len(), 1);
        assert_eq!(with_milk[0].name, "Pancakes");

        assert!(catalog.list_recipes(Some("Butter")).is_empty());
    }

    #[test]
    fn list_ingredients_deduplicates() {
        let catalog = Catalog::new(MockRepository::new([
            recipe("a", "A", vec![Ingredient::new("Egg", 1.0, "")]),
            recipe(
                "b",
                "B",
                vec![Ingredient::new("Egg", 2.0, ""), Ingredient::new("Salt", 1.0, "")],
            ),
        ]));

        let mut names = catalog.list_ingredients();
        names.sort();

        assert_eq!(names, ["Egg", "Salt"]);
    }
}
