//! FridgeChef Common Library
//!
//! Types and utilities shared between the CLI and the analysis gateway

pub mod error;
pub mod parser;
pub mod prompts;
pub mod types;
pub mod validate;

pub use error::{Error, Result};
pub use parser::{extract_json, parse_analysis_response};
pub use prompts::{build_analysis_prompt, DIETARY_FILTERS};
pub use types::{AnalysisOutcome, Difficulty, Ingredient, Recipe, ShoppingItem};
pub use validate::validate_outcome;
