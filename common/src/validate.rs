//! Schema validation of gateway output
//!
//! Deserialization already enforces the closed difficulty set and
//! non-negative calories; this pass checks the remaining invariants so
//! that malformed recipes never reach the selection or session layers.

use crate::error::{Error, Result};
use crate::types::AnalysisOutcome;

/// Validate a parsed gateway response against the data-model invariants.
///
/// Checks:
/// - at least one recipe (an empty suggestion set is a failed analysis)
/// - every recipe has a non-blank title and at least one non-blank step
/// - every ingredient has a non-blank name
pub fn validate_outcome(outcome: &AnalysisOutcome) -> Result<()> {
    if outcome.recipes.is_empty() {
        return Err(Error::Validation("response contains no recipes".into()));
    }

    for (idx, recipe) in outcome.recipes.iter().enumerate() {
        let label = if recipe.title.trim().is_empty() {
            format!("recipe #{}", idx + 1)
        } else {
            format!("recipe '{}'", recipe.title)
        };

        if recipe.title.trim().is_empty() {
            return Err(Error::Validation(format!("{} has an empty title", label)));
        }

        if recipe.steps.is_empty() {
            return Err(Error::Validation(format!("{} has no steps", label)));
        }

        if recipe.steps.iter().any(|s| s.trim().is_empty()) {
            return Err(Error::Validation(format!("{} has a blank step", label)));
        }

        if recipe.ingredients.iter().any(|i| i.name.trim().is_empty()) {
            return Err(Error::Validation(format!(
                "{} has an ingredient without a name",
                label
            )));
        }
    }

    Ok(())
}
