//! Proportional rescaling of ingredient quantities.

use super::Recipe;

/// Errors returned by [`Recipe::compute_ratios`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatioError {
    /// The constraint ingredient is absent from the recipe, or its quantity is
    /// zero.
    #[error("ingredient constraint '{0}' not found in recipe")]
    ConstraintNotFound(String),

    /// The computed scaling ratio is not a finite, strictly positive number,
    /// or applying it would overflow an ingredient quantity.
    #[error("invalid scaling ratio: {0}")]
    InvalidRatio(f64),
}

impl Recipe {
    /// Rescale every ingredient so that `ingredient` ends up at `quantity`.
    ///
    /// The first ingredient named exactly `ingredient` provides the base
    /// quantity. Every ingredient, the constraint included, is multiplied by
    /// `quantity / base`. Order, names and units are left alone.
    ///
    /// An empty `ingredient` or a `quantity` that is not strictly positive
    /// means "no constraint": the recipe is left untouched and `Ok(())` is
    /// returned. A NaN `quantity` is treated the same way, even though it does
    /// not compare as `<= 0`.
    ///
    /// This mutates `self`. Scale a copy when the original must be kept.
    ///
    /// # Errors
    ///
    /// - [`RatioError::ConstraintNotFound`] if no ingredient has that name, or
    ///   if the matching ingredient has a quantity of zero
    /// - [`RatioError::InvalidRatio`] if the ratio is not finite and strictly
    ///   positive, or if any scaled quantity would not be finite
    ///
    /// On error the recipe is unchanged.
    pub fn compute_ratios(&mut self, ingredient: &str, quantity: f64) -> Result<(), RatioError> {
        if ingredient.is_empty() || quantity.is_nan() || quantity <= 0.0 {
            return Ok(());
        }

        // A zero base is indistinguishable from a missing ingredient here.
        let base = self
            .ingredient(ingredient)
            .map(|found| found.quantity)
            .filter(|&base| base != 0.0)
            .ok_or_else(|| RatioError::ConstraintNotFound(ingredient.to_string()))?;

        let ratio = quantity / base;
        if ratio <= 0.0
            || !ratio.is_finite()
            || self
                .ingredients
                .iter()
                .any(|item| !(item.quantity * ratio).is_finite())
        {
            return Err(RatioError::InvalidRatio(ratio));
        }

        tracing::debug!(
            recipe = %self.id,
            ingredient,
            ratio,
            "scaling recipe"
        );

        for item in &mut self.ingredients {
            item.quantity *= ratio;
        }

        Ok(())
    }
}
