use serde::{Deserialize, Deserializer, Serialize};

/// A recipe is a named dish definition.
///
/// Recipes are read from JSON files and served as-is, except for ingredient
/// quantities which may be rescaled per request (see
/// [`Recipe::compute_ratios`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Identifier, unique within a loaded set of recipes.
    pub id: String,
    /// Display name of the dish.
    pub name: String,
    /// Ingredients in the order they appear in the source file.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ingredients: Vec<Ingredient>,
    /// Preparation steps. These are passed through untouched.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub steps: Vec<Step>,
}

impl Recipe {
    /// Returns `true` if any ingredient is named exactly `name`.
    ///
    /// The comparison is case-sensitive and does not match substrings.
    #[must_use]
    pub fn has_ingredient(&self, name: &str) -> bool {
        self.ingredients.iter().any(|ingredient| ingredient.name == name)
    }

    /// Returns the first ingredient named exactly `name`.
    #[must_use]
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients
            .iter()
            .find(|ingredient| ingredient.name == name)
    }
}

/// A named component of a recipe with a quantity and unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name, e.g. "Flour".
    pub name: String,
    /// Amount of the ingredient, in `unit`. Zero when the file omits it.
    #[serde(default)]
    pub quantity: f64,
    /// Display-only unit, e.g. "grams".
    #[serde(default)]
    pub unit: String,
}

impl Ingredient {
    /// Creates a new ingredient.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// A single preparation step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    /// Step identifier.
    pub id: String,
    /// Short title of the step.
    pub name: String,
    /// Free text instructions.
    pub instructions: String,
    /// Pictures illustrating the step.
    #[serde(rename = "illustration", deserialize_with = "null_as_empty")]
    pub illustrations: Vec<Illustration>,
}

/// A picture attached to a [`Step`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Illustration {
    /// Illustration identifier.
    pub id: String,
    /// Caption.
    pub description: String,
    /// Path of the image, relative to the static file directory.
    pub filepath: String,
}

/// Lists written as `null` load as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
