//! Recipe catalog value types
//!
//! Shared between the CLI and the analysis gateway:
//! - `Ingredient` / `Recipe`: immutable data produced by the gateway
//! - `ShoppingItem`: persisted shopping-list entry
//! - `AnalysisOutcome`: the full gateway response envelope
//!
//! Wire format is camelCase JSON, matching the model's response schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One ingredient of a recipe.
///
/// `is_missing` marks ingredients the model judged necessary but absent
/// from the photographed scene; it is only meaningful within one recipe.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Ingredient {
    pub name: String,
    pub amount: Option<String>,
    pub is_missing: Option<bool>,
}

impl Ingredient {
    /// Human-facing form: `"200g tomatoes"`, or just the name when no
    /// amount was given.
    pub fn display_name(&self) -> String {
        match self.amount.as_deref() {
            Some(amount) if !amount.trim().is_empty() => {
                format!("{} {}", amount.trim(), self.name.trim())
            }
            _ => self.name.trim().to_string(),
        }
    }

    pub fn missing(&self) -> bool {
        self.is_missing.unwrap_or(false)
    }
}

/// Recipe difficulty. Closed set: any other string in a gateway response
/// is a schema violation and fails deserialization.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", label)
    }
}

/// A gateway-suggested recipe.
///
/// `id` is opaque and gateway-assigned; it is not stable across repeated
/// analyses. `title` doubles as the human-facing key for ratings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,

    /// Free-form, not parsed ("25 min").
    pub prep_time: String,

    pub calories: u32,
    pub difficulty: Difficulty,
    pub dietary_tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
}

impl Recipe {
    /// Ingredients the model judged needed but not visible in the photo,
    /// in source order.
    pub fn missing_ingredients(&self) -> Vec<&Ingredient> {
        self.ingredients.iter().filter(|i| i.missing()).collect()
    }
}

/// Persisted shopping-list entry. `name` is already composed as
/// "amount name"; `recipe_title` records provenance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    pub recipe_title: Option<String>,
    pub checked: bool,
}

/// Full gateway response: suggested recipes plus the raw list of
/// ingredients detected in the image.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisOutcome {
    pub recipes: Vec<Recipe>,
    pub detected_ingredients: Vec<String>,
}
