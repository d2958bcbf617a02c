//! Persisted recipe ratings
//!
//! Ratings are keyed by recipe *title*, not gateway id: ids are reassigned
//! on every analysis, titles are the stable human-facing key. Two distinct
//! recipes sharing a title share a rating; that collision is accepted.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

const RATINGS_FILE_NAME: &str = "ratings.json";

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Rating store: title → score in [1,5]. A missing key means "unrated";
/// a zero score is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ratings {
    version: u32,
    entries: HashMap<String, u8>,
}

impl Ratings {
    const CURRENT_VERSION: u32 = 1;

    /// Load from `dir`. Missing or corrupt data yields an empty store,
    /// never an error.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(RATINGS_FILE_NAME);
        if !path.exists() {
            return Self::default();
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        match serde_json::from_reader::<_, Ratings>(BufReader::new(file)) {
            Ok(ratings) if ratings.version == Self::CURRENT_VERSION => ratings,
            _ => Self::default(),
        }
    }

    /// Write the full snapshot to `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let file = File::create(dir.join(RATINGS_FILE_NAME))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Record a rating, last-write-wins. Out-of-range scores are clamped
    /// into [1,5] rather than rejected. Returns the stored value.
    pub fn rate(&mut self, title: &str, score: i32) -> u8 {
        let clamped = score.clamp(MIN_RATING as i32, MAX_RATING as i32) as u8;
        self.entries.insert(title.to_string(), clamped);
        clamped
    }

    /// 0 means unrated.
    pub fn get(&self, title: &str) -> u8 {
        self.entries.get(title).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Ratings {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}
