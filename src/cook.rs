//! Interactive cooking loop
//!
//! Drives a `CookingSession` from the terminal: one prompt per turn,
//! single-letter actions for stepping and narration, digits for rating.
//! Shopping list and ratings are loaded, mutated and saved inside the
//! loop so nothing is lost if the process dies between turns.

use crate::error::{FridgeChefError, Result};
use crate::ratings::Ratings;
use crate::session::{CookingSession, PREP_STEP};
use crate::shopping::ShoppingList;
use crate::speech::{CommandNarrator, Narrator};
use dialoguer::Input;
use fridgechef_common::Recipe;
use std::path::Path;

/// One turn of the cooking prompt.
pub enum CookAction {
    /// Next step
    Next,
    /// Previous step (or back to prep)
    Prev,
    /// Start or stop narration of the current view
    Voice,
    /// Send missing ingredients to the shopping list
    Missing,
    /// Rate the recipe
    Rate(i32),
    /// Close the session
    Quit,
    /// Anything else: redraw
    Unknown,
}

/// Map prompt input to an action. Empty input means "next", the common
/// case while cooking with wet hands.
pub fn parse_action(input: &str) -> CookAction {
    let trimmed = input.trim();

    if let Ok(score) = trimmed.parse::<i32>() {
        return CookAction::Rate(score);
    }

    match trimmed {
        "" | "n" => CookAction::Next,
        "p" | "b" => CookAction::Prev,
        "v" => CookAction::Voice,
        "m" => CookAction::Missing,
        "q" | "Q" => CookAction::Quit,
        _ => CookAction::Unknown,
    }
}

/// Pick a recipe from the list by exact title, 1-based number, or by
/// being the only one there.
pub fn select_recipe(
    recipes: &[Recipe],
    title: Option<&str>,
    index: Option<usize>,
) -> Result<Recipe> {
    if recipes.is_empty() {
        return Err(FridgeChefError::RecipeNotFound("(no recipes)".into()));
    }

    if let Some(title) = title {
        return recipes
            .iter()
            .find(|r| r.title == title)
            .cloned()
            .ok_or_else(|| FridgeChefError::RecipeNotFound(title.to_string()));
    }

    if let Some(index) = index {
        return recipes
            .get(index.wrapping_sub(1))
            .cloned()
            .ok_or_else(|| FridgeChefError::RecipeNotFound(format!("#{}", index)));
    }

    if recipes.len() == 1 {
        return Ok(recipes[0].clone());
    }

    Err(FridgeChefError::Session(
        "multiple recipes in file, pick one with --title or --index".into(),
    ))
}

/// Run the cooking session for `recipe` until the user quits.
pub fn run_interactive_cooking(
    recipe: Recipe,
    speech_command: Option<String>,
    data_dir: &Path,
) -> Result<()> {
    let narrator = CommandNarrator::new(speech_command);
    let mut session = CookingSession::new(recipe, narrator)?;

    println!("🍳 {}\n", session.recipe().title);
    println!("Actions: [Enter/n]next [p]rev [v]oice [m]issing→shopping [1-5]rate [q]uit");
    println!("---\n");

    loop {
        session.poll_narration();
        print_view(&session);

        let input: String = Input::new()
            .with_prompt(session.position_label())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| FridgeChefError::CliExecution(e.to_string()))?;

        match parse_action(&input) {
            CookAction::Next => session.advance(),
            CookAction::Prev => session.retreat(),
            CookAction::Voice => {
                session.toggle_playback();
                if session.is_playing() {
                    println!("  🔊 speaking...\n");
                } else {
                    println!("  🔇 stopped\n");
                }
            }
            CookAction::Missing => {
                let mut list = ShoppingList::load(data_dir);
                let added = session.commit_missing_ingredients(&mut list);
                if added > 0 {
                    list.save(data_dir)?;
                    println!("  ✔ {} item(s) added to the shopping list\n", added);
                } else {
                    println!("  Nothing missing for this recipe\n");
                }
            }
            CookAction::Rate(score) => {
                let mut ratings = Ratings::load(data_dir);
                if let Some(stored) = session.rate(score, &mut ratings) {
                    ratings.save(data_dir)?;
                    println!("  ✔ Rated {} star(s)\n", stored);
                }
            }
            CookAction::Quit => {
                session.close();
                println!("\n👋 Session closed");
                break;
            }
            CookAction::Unknown => {}
        }
    }

    Ok(())
}

fn print_view<N: Narrator>(session: &CookingSession<N>) {
    let recipe = session.recipe();

    if session.cursor() == PREP_STEP {
        println!("📋 Ingredients for {}:", recipe.title);
        for ingredient in &recipe.ingredients {
            let marker = if ingredient.missing() { "✗ missing" } else { "✓" };
            println!("  {} {}", marker, ingredient.display_name());
        }
        println!();
    } else {
        println!("{}", session.position_label());
        println!("  {}\n", recipe.steps[session.cursor() as usize]);
    }
}
