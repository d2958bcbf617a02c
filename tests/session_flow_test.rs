//! Cooking session flow tests
//!
//! A full cook-through against real persisted stores: step through the
//! recipe, send missing ingredients to the shopping list, rate, close,
//! and check everything survives a reload.

use fridgechef_rust::ratings::Ratings;
use fridgechef_rust::session::{CookingSession, PREP_STEP};
use fridgechef_rust::shopping::ShoppingList;
use fridgechef_rust::speech::Narrator;
use fridgechef_common::{Ingredient, Recipe};
use tempfile::tempdir;

struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(&mut self, _text: &str) {}
    fn cancel(&mut self) {}
    fn finished(&mut self) -> bool {
        true
    }
}

fn pasta() -> Recipe {
    Recipe {
        id: "r-1".into(),
        title: "Basil Pasta".into(),
        steps: vec![
            "Boil the pasta".into(),
            "Blend the basil".into(),
            "Toss together".into(),
        ],
        ingredients: vec![
            Ingredient {
                name: "pasta".into(),
                amount: Some("200g".into()),
                is_missing: None,
            },
            Ingredient {
                name: "basil".into(),
                amount: Some("1 bunch".into()),
                is_missing: Some(true),
            },
            Ingredient {
                name: "parmesan".into(),
                amount: None,
                is_missing: Some(true),
            },
        ],
        ..Default::default()
    }
}

#[test]
fn full_cook_through_persists_shopping_and_rating() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut session = CookingSession::new(pasta(), SilentNarrator).expect("session failed");
    assert_eq!(session.cursor(), PREP_STEP);
    assert_eq!(session.position_label(), "Prep");

    // missing ingredients go to the shopping list mid-session
    let mut list = ShoppingList::load(dir.path());
    let added = session.commit_missing_ingredients(&mut list);
    assert_eq!(added, 2);
    list.save(dir.path()).expect("shopping save failed");

    // walk to the last step, clamped there
    session.advance();
    session.advance();
    session.advance();
    assert_eq!(session.position_label(), "Step 3 of 3");
    session.advance();
    assert_eq!(session.position_label(), "Step 3 of 3");

    // rate and close
    let mut ratings = Ratings::load(dir.path());
    assert_eq!(session.rate(4, &mut ratings), Some(4));
    ratings.save(dir.path()).expect("ratings save failed");
    session.close();
    assert!(session.is_closed());

    // closed session rejects further mutations
    let mut list_after = ShoppingList::load(dir.path());
    assert_eq!(session.commit_missing_ingredients(&mut list_after), 0);
    assert_eq!(session.rate(1, &mut ratings), None);

    // everything survives a reload
    let list = ShoppingList::load(dir.path());
    let names: Vec<&str> = list.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["1 bunch basil", "parmesan"]);
    assert!(list
        .items()
        .iter()
        .all(|i| i.recipe_title.as_deref() == Some("Basil Pasta")));

    let ratings = Ratings::load(dir.path());
    assert_eq!(ratings.get("Basil Pasta"), 4);
}

#[test]
fn committing_twice_duplicates_items() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut list = ShoppingList::load(dir.path());

    let mut first = CookingSession::new(pasta(), SilentNarrator).expect("session failed");
    first.commit_missing_ingredients(&mut list);
    first.close();

    let mut second = CookingSession::new(pasta(), SilentNarrator).expect("session failed");
    second.commit_missing_ingredients(&mut list);
    second.close();

    // append-only, no merging of same-named entries
    assert_eq!(list.len(), 4);
    let ids: Vec<&str> = list.items().iter().map(|i| i.id.as_str()).collect();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 4);
}

#[test]
fn shopping_ids_stay_unique_across_reloads() {
    let dir = tempdir().expect("Failed to create temp dir");
    let basil = [Ingredient {
        name: "basil".into(),
        amount: None,
        is_missing: Some(true),
    }];

    let mut list = ShoppingList::load(dir.path());
    list.add_all(&basil, None);
    let first_id = list.items()[0].id.clone();
    list.remove(&first_id);
    list.save(dir.path()).expect("save failed");

    // the id counter is persisted, so the removed id is never reused
    let mut list = ShoppingList::load(dir.path());
    list.add_all(&basil, None);
    assert_ne!(list.items()[0].id, first_id);
}

#[test]
fn reopening_a_recipe_starts_fresh() {
    let mut session = CookingSession::new(pasta(), SilentNarrator).expect("session failed");
    session.advance();
    session.advance();
    session.close();

    // no resume: a new session starts at prep
    let session = CookingSession::new(pasta(), SilentNarrator).expect("session failed");
    assert_eq!(session.cursor(), PREP_STEP);
}

#[test]
fn recipe_without_steps_is_not_cookable() {
    let recipe = Recipe {
        title: "Empty".into(),
        ..Default::default()
    };
    assert!(CookingSession::new(recipe, SilentNarrator).is_err());
}
