//! Recipe selection view model
//!
//! Holds the last analysis result and the active dietary filters, and
//! derives the visible recipe list. Pure state, no side effects: both
//! lists are replaced wholesale on a successful analysis, never merged.

use fridgechef_common::{AnalysisOutcome, Recipe};

#[derive(Debug, Clone, Default)]
pub struct RecipeBoard {
    recipes: Vec<Recipe>,
    detected_ingredients: Vec<String>,
    active_filters: Vec<String>,
}

impl RecipeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace recipes and detected ingredients together. Active filters
    /// are kept: they describe the user's preference, not the result set.
    pub fn replace_results(&mut self, outcome: AnalysisOutcome) {
        self.recipes = outcome.recipes;
        self.detected_ingredients = outcome.detected_ingredients;
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn detected_ingredients(&self) -> &[String] {
        &self.detected_ingredients
    }

    pub fn active_filters(&self) -> &[String] {
        &self.active_filters
    }

    /// Toggle a filter label: add if absent, remove if present.
    /// Applying the same toggle twice restores the original set.
    pub fn toggle_filter(&mut self, label: &str) {
        if let Some(pos) = self.active_filters.iter().position(|f| f == label) {
            self.active_filters.remove(pos);
        } else {
            self.active_filters.push(label.to_string());
        }
    }

    pub fn set_filters(&mut self, filters: Vec<String>) {
        self.active_filters = filters;
    }

    /// Recipes whose tags contain every active filter (exact string
    /// equality, AND semantics). An empty filter set shows everything.
    pub fn visible_recipes(&self) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| {
                self.active_filters
                    .iter()
                    .all(|f| recipe.dietary_tags.iter().any(|tag| tag == f))
            })
            .collect()
    }
}
