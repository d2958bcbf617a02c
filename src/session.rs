//! Cooking session state machine
//!
//! One session per recipe: a step cursor (with a virtual prep view at
//! -1), single-flight voice narration, rating capture, and the
//! missing-ingredient hand-off to the shopping list. The session is
//! discarded when closed; nothing of it persists across sessions.

use crate::error::{FridgeChefError, Result};
use crate::ratings::Ratings;
use crate::shopping::ShoppingList;
use crate::speech::Narrator;
use fridgechef_common::Recipe;

/// Cursor value for the ingredients/prep view.
pub const PREP_STEP: i32 = -1;

pub struct CookingSession<N: Narrator> {
    recipe: Recipe,
    narrator: N,
    cursor: i32,
    /// Token of the utterance in flight, if any. A new utterance gets a
    /// fresh token so a stale completion signal cannot stop it.
    active_utterance: Option<u64>,
    next_utterance: u64,
    closed: bool,
}

impl<N: Narrator> CookingSession<N> {
    /// A session is only enterable for a recipe with at least one step.
    pub fn new(recipe: Recipe, narrator: N) -> Result<Self> {
        if recipe.steps.is_empty() {
            return Err(FridgeChefError::Session(format!(
                "recipe '{}' has no steps",
                recipe.title
            )));
        }
        Ok(Self {
            recipe,
            narrator,
            cursor: PREP_STEP,
            active_utterance: None,
            next_utterance: 0,
            closed: false,
        })
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Current cursor in `[-1, steps.len() - 1]`; -1 is the prep view.
    pub fn cursor(&self) -> i32 {
        self.cursor
    }

    pub fn is_playing(&self) -> bool {
        self.active_utterance.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn last_step(&self) -> i32 {
        self.recipe.steps.len() as i32 - 1
    }

    /// "Prep" or "Step n of m", for headers.
    pub fn position_label(&self) -> String {
        if self.cursor == PREP_STEP {
            "Prep".to_string()
        } else {
            format!("Step {} of {}", self.cursor + 1, self.recipe.steps.len())
        }
    }

    /// Move to the next step, clamped at the last one. Any in-progress
    /// narration is interrupted.
    pub fn advance(&mut self) {
        if self.closed {
            return;
        }
        self.stop_playback();
        if self.cursor < self.last_step() {
            self.cursor += 1;
        }
    }

    /// Move back, clamped at the prep view. Interrupts narration.
    pub fn retreat(&mut self) {
        if self.closed {
            return;
        }
        self.stop_playback();
        if self.cursor > PREP_STEP {
            self.cursor -= 1;
        }
    }

    /// The utterance for the current cursor position. Prep view reads the
    /// title and the full ingredient roll; a step reads its number and
    /// text.
    pub fn narration_text(&self) -> String {
        if self.cursor == PREP_STEP {
            let roll = self
                .recipe
                .ingredients
                .iter()
                .map(|i| i.display_name())
                .collect::<Vec<_>>()
                .join(", ");
            format!("Ingredients for {}. {}", self.recipe.title, roll)
        } else {
            format!(
                "Step {}. {}",
                self.cursor + 1,
                self.recipe.steps[self.cursor as usize]
            )
        }
    }

    /// Idle → Playing: speak the current cursor's text from the top.
    /// Playing → Idle: halt immediately, nothing queued behind it.
    pub fn toggle_playback(&mut self) {
        if self.closed {
            return;
        }
        if self.active_utterance.is_some() {
            self.stop_playback();
        } else {
            let text = self.narration_text();
            self.narrator.speak(&text);
            let token = self.next_utterance;
            self.next_utterance += 1;
            self.active_utterance = Some(token);
        }
    }

    /// Token of the utterance currently in flight.
    pub fn active_utterance(&self) -> Option<u64> {
        self.active_utterance
    }

    /// Completion signal from the narration back end. Stale tokens (from
    /// an utterance that was already replaced or cancelled) are ignored.
    pub fn narration_finished(&mut self, token: u64) {
        if self.active_utterance == Some(token) {
            self.active_utterance = None;
        }
    }

    /// Poll the narrator and apply its completion signal, if any.
    pub fn poll_narration(&mut self) {
        if let Some(token) = self.active_utterance {
            if self.narrator.finished() {
                self.narration_finished(token);
            }
        }
    }

    /// Append every missing ingredient of this recipe to the shopping
    /// list, in source order, tagged with the recipe title. Zero missing
    /// ingredients is a valid no-op; calling twice appends twice.
    pub fn commit_missing_ingredients(&mut self, list: &mut ShoppingList) -> usize {
        if self.closed {
            return 0;
        }
        let missing = self.recipe.missing_ingredients();
        list.add_all(missing, Some(&self.recipe.title))
    }

    /// Rate this recipe, keyed by title, last-write-wins. Out-of-range
    /// scores are clamped by the rating store. Returns the stored value.
    pub fn rate(&mut self, score: i32, ratings: &mut Ratings) -> Option<u8> {
        if self.closed {
            return None;
        }
        Some(ratings.rate(&self.recipe.title, score))
    }

    /// Terminal: halts narration and invalidates every later operation.
    pub fn close(&mut self) {
        self.stop_playback();
        self.closed = true;
    }

    fn stop_playback(&mut self) {
        if self.active_utterance.take().is_some() {
            self.narrator.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fridgechef_common::Ingredient;

    /// Records utterances instead of speaking; completion is driven by
    /// the test through `done`.
    #[derive(Default)]
    struct RecordingNarrator {
        spoken: Vec<String>,
        cancels: usize,
        done: bool,
    }

    impl Narrator for RecordingNarrator {
        fn speak(&mut self, text: &str) {
            self.spoken.push(text.to_string());
            self.done = false;
        }

        fn cancel(&mut self) {
            self.cancels += 1;
        }

        fn finished(&mut self) -> bool {
            self.done
        }
    }

    fn tomato_soup() -> Recipe {
        Recipe {
            id: "r1".into(),
            title: "Tomato Soup".into(),
            ingredients: vec![
                Ingredient {
                    name: "tomatoes".into(),
                    amount: Some("4".into()),
                    is_missing: None,
                },
                Ingredient {
                    name: "basil".into(),
                    amount: None,
                    is_missing: Some(true),
                },
                Ingredient {
                    name: "cream".into(),
                    amount: Some("100ml".into()),
                    is_missing: Some(true),
                },
            ],
            steps: vec!["Boil water".into(), "Add tomato".into()],
            ..Default::default()
        }
    }

    fn session() -> CookingSession<RecordingNarrator> {
        CookingSession::new(tomato_soup(), RecordingNarrator::default()).unwrap()
    }

    #[test]
    fn test_initial_state_is_prep_and_idle() {
        let s = session();
        assert_eq!(s.cursor(), PREP_STEP);
        assert!(!s.is_playing());
        assert_eq!(s.position_label(), "Prep");
    }

    #[test]
    fn test_empty_steps_not_enterable() {
        let recipe = Recipe {
            title: "No Steps".into(),
            ..Default::default()
        };
        let result = CookingSession::new(recipe, RecordingNarrator::default());
        assert!(matches!(result, Err(FridgeChefError::Session(_))));
    }

    #[test]
    fn test_advance_clamps_at_last_step() {
        let mut s = session();
        s.advance();
        assert_eq!(s.cursor(), 0);
        s.advance();
        assert_eq!(s.cursor(), 1);
        s.advance();
        assert_eq!(s.cursor(), 1); // no-op at the last step
        assert_eq!(s.position_label(), "Step 2 of 2");
    }

    #[test]
    fn test_retreat_clamps_at_prep() {
        let mut s = session();
        s.retreat();
        assert_eq!(s.cursor(), PREP_STEP);
        s.advance();
        s.retreat();
        assert_eq!(s.cursor(), PREP_STEP);
    }

    #[test]
    fn test_prep_narration_reads_title_and_ingredients() {
        let mut s = session();
        s.toggle_playback();
        assert!(s.is_playing());
        assert_eq!(
            s.narrator.spoken[0],
            "Ingredients for Tomato Soup. 4 tomatoes, basil, 100ml cream"
        );
    }

    #[test]
    fn test_step_narration_has_number_prefix() {
        let mut s = session();
        s.advance();
        s.toggle_playback();
        assert_eq!(s.narrator.spoken[0], "Step 1. Boil water");
    }

    #[test]
    fn test_toggle_while_playing_stops_without_queueing() {
        let mut s = session();
        s.toggle_playback();
        s.toggle_playback();

        assert!(!s.is_playing());
        assert_eq!(s.narrator.spoken.len(), 1);
        assert_eq!(s.narrator.cancels, 1);
    }

    #[test]
    fn test_restart_speaks_from_the_beginning() {
        let mut s = session();
        s.toggle_playback();
        s.toggle_playback();
        s.toggle_playback();

        assert_eq!(s.narrator.spoken.len(), 2);
        assert_eq!(s.narrator.spoken[0], s.narrator.spoken[1]);
    }

    #[test]
    fn test_advance_interrupts_playback() {
        let mut s = session();
        s.toggle_playback();
        s.advance();

        assert!(!s.is_playing());
        assert_eq!(s.narrator.cancels, 1);
        // cursor moved despite the interruption
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn test_completion_signal_transitions_to_idle() {
        let mut s = session();
        s.toggle_playback();
        let token = s.active_utterance().unwrap();

        s.narration_finished(token);
        assert!(!s.is_playing());
        // completion is not a cancellation
        assert_eq!(s.narrator.cancels, 0);
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut s = session();
        s.toggle_playback();
        let first = s.active_utterance().unwrap();
        s.toggle_playback(); // stop
        s.toggle_playback(); // new utterance, new token

        s.narration_finished(first);
        assert!(s.is_playing());
    }

    #[test]
    fn test_poll_narration_applies_completion() {
        let mut s = session();
        s.toggle_playback();
        s.poll_narration();
        assert!(s.is_playing());

        s.narrator.done = true;
        s.poll_narration();
        assert!(!s.is_playing());
    }

    #[test]
    fn test_commit_missing_appends_in_source_order() {
        let mut s = session();
        let mut list = ShoppingList::default();

        let added = s.commit_missing_ingredients(&mut list);

        assert_eq!(added, 2);
        assert_eq!(list.items()[0].name, "basil");
        assert_eq!(list.items()[1].name, "100ml cream");
        assert_eq!(
            list.items()[0].recipe_title.as_deref(),
            Some("Tomato Soup")
        );
    }

    #[test]
    fn test_commit_missing_twice_duplicates() {
        let mut s = session();
        let mut list = ShoppingList::default();

        s.commit_missing_ingredients(&mut list);
        s.commit_missing_ingredients(&mut list);

        assert_eq!(list.len(), 4);
        assert_ne!(list.items()[0].id, list.items()[2].id);
    }

    #[test]
    fn test_commit_with_no_missing_is_noop() {
        let recipe = Recipe {
            title: "All There".into(),
            ingredients: vec![Ingredient {
                name: "eggs".into(),
                ..Default::default()
            }],
            steps: vec!["Fry".into()],
            ..Default::default()
        };
        let mut s = CookingSession::new(recipe, RecordingNarrator::default()).unwrap();
        let mut list = ShoppingList::default();

        assert_eq!(s.commit_missing_ingredients(&mut list), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_rate_is_keyed_by_title_and_clamped() {
        let mut s = session();
        let mut ratings = Ratings::default();

        assert_eq!(s.rate(4, &mut ratings), Some(4));
        assert_eq!(ratings.get("Tomato Soup"), 4);

        assert_eq!(s.rate(11, &mut ratings), Some(5));
        assert_eq!(ratings.get("Tomato Soup"), 5);
    }

    #[test]
    fn test_close_is_terminal() {
        let mut s = session();
        let mut list = ShoppingList::default();
        let mut ratings = Ratings::default();

        s.toggle_playback();
        s.close();

        assert!(s.is_closed());
        assert!(!s.is_playing());
        assert_eq!(s.narrator.cancels, 1);

        s.advance();
        assert_eq!(s.cursor(), PREP_STEP);
        s.toggle_playback();
        assert!(!s.is_playing());
        assert_eq!(s.narrator.spoken.len(), 1);
        assert_eq!(s.commit_missing_ingredients(&mut list), 0);
        assert_eq!(s.rate(3, &mut ratings), None);
        assert_eq!(ratings.get("Tomato Soup"), 0);
    }
}
