//! FridgeChef core
//!
//! Fridge photo in, cookable recipes out: image acquisition and AI
//! analysis, the filterable recipe board, the step-by-step cooking
//! session with voice narration, and the persisted shopping list and
//! ratings.

pub mod acquisition;
pub mod ai_provider;
pub mod cli;
pub mod config;
pub mod cook;
pub mod error;
pub mod ratings;
pub mod selection;
pub mod session;
pub mod shopping;
pub mod speech;

pub use error::{FridgeChefError, Result};
