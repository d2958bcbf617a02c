//! Persisted shopping list
//!
//! Append-only ordered collection: items committed from a cooking session
//! are appended with fresh ids and never merged with same-named entries,
//! so committing the same missing set twice yields duplicates by design.
//! The id counter is persisted so ids stay unique across restarts and
//! removals.

use crate::error::Result;
use fridgechef_common::{Ingredient, ShoppingItem};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

const SHOPPING_FILE_NAME: &str = "shopping-list.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingList {
    version: u32,
    next_id: u64,
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    const CURRENT_VERSION: u32 = 1;

    /// Load from `dir`. Missing or corrupt data yields an empty list,
    /// never an error.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(SHOPPING_FILE_NAME);
        if !path.exists() {
            return Self::default();
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        match serde_json::from_reader::<_, ShoppingList>(BufReader::new(file)) {
            Ok(list) if list.version == Self::CURRENT_VERSION => list,
            _ => Self::default(),
        }
    }

    /// Write the full snapshot to `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let file = File::create(dir.join(SHOPPING_FILE_NAME))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Append one item per ingredient, in source order, each with a fresh
    /// unique id. An empty batch is a valid no-op. Returns the number of
    /// items appended.
    pub fn add_all<'a, I>(&mut self, ingredients: I, recipe_title: Option<&str>) -> usize
    where
        I: IntoIterator<Item = &'a Ingredient>,
    {
        let mut added = 0;
        for ingredient in ingredients {
            let id = format!("itm-{:05}", self.next_id);
            self.next_id += 1;
            self.items.push(ShoppingItem {
                id,
                name: ingredient.display_name(),
                recipe_title: recipe_title.map(|t| t.to_string()),
                checked: false,
            });
            added += 1;
        }
        added
    }

    /// Flip `checked` for the matching entry. No-op if the id is absent.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.checked = !item.checked;
                true
            }
            None => false,
        }
    }

    /// Delete the matching entry. No-op if the id is absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Delete all checked entries, preserving the relative order of the
    /// remainder. Returns the number removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.checked);
        before - self.items.len()
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn unchecked_count(&self) -> usize {
        self.items.iter().filter(|item| !item.checked).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ShoppingList {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            next_id: 1,
            items: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, amount: Option<&str>) -> Ingredient {
        Ingredient {
            name: name.into(),
            amount: amount.map(|a| a.to_string()),
            is_missing: Some(true),
        }
    }

    #[test]
    fn test_add_all_composes_names() {
        let mut list = ShoppingList::default();
        let items = [ingredient("onions", Some("2")), ingredient("salt", None)];

        let added = list.add_all(&items, Some("Tomato Soup"));

        assert_eq!(added, 2);
        assert_eq!(list.items()[0].name, "2 onions");
        assert_eq!(list.items()[1].name, "salt");
        assert_eq!(list.items()[0].recipe_title.as_deref(), Some("Tomato Soup"));
        assert!(!list.items()[0].checked);
    }

    #[test]
    fn test_add_all_empty_batch_is_noop() {
        let mut list = ShoppingList::default();
        assert_eq!(list.add_all(&[], None), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut list = ShoppingList::default();
        let batch = [ingredient("a", None), ingredient("b", None)];
        list.add_all(&batch, None);
        list.add_all(&batch, None);

        let ids: Vec<&str> = list.items().iter().map(|i| i.id.as_str()).collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 4);

        // duplicates of the same name are kept, no merging
        assert_eq!(list.len(), 4);
        assert_eq!(list.items()[0].name, list.items()[2].name);
    }

    #[test]
    fn test_toggle_and_absent_id() {
        let mut list = ShoppingList::default();
        list.add_all(&[ingredient("milk", None)], None);
        let id = list.items()[0].id.clone();

        assert!(list.toggle(&id));
        assert!(list.items()[0].checked);
        assert!(list.toggle(&id));
        assert!(!list.items()[0].checked);

        assert!(!list.toggle("itm-99999"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_and_absent_id() {
        let mut list = ShoppingList::default();
        list.add_all(&[ingredient("milk", None), ingredient("eggs", None)], None);
        let id = list.items()[0].id.clone();

        assert!(list.remove(&id));
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].name, "eggs");

        assert!(!list.remove(&id));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_clear_completed_preserves_order() {
        let mut list = ShoppingList::default();
        let batch = [
            ingredient("a", None),
            ingredient("b", None),
            ingredient("c", None),
            ingredient("d", None),
        ];
        list.add_all(&batch, None);

        let id_b = list.items()[1].id.clone();
        let id_d = list.items()[3].id.clone();
        list.toggle(&id_b);
        list.toggle(&id_d);

        assert_eq!(list.clear_completed(), 2);
        let names: Vec<&str> = list.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(list.unchecked_count(), 2);
    }

    #[test]
    fn test_clear_completed_on_clean_list() {
        let mut list = ShoppingList::default();
        list.add_all(&[ingredient("a", None)], None);
        assert_eq!(list.clear_completed(), 0);
        assert_eq!(list.len(), 1);
    }
}
