//! Analysis result cache
//!
//! Caches gateway responses keyed by image content plus the active
//! dietary filters, so re-analyzing the same photo with the same
//! preferences skips the model round-trip. Filters are part of the key
//! because they change the gateway's answer.

use crate::error::Result;
use super::{CapturedImage, IngredientAnalyzer};
use fridgechef_common::AnalysisOutcome;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".analysis-cache.json";

/// Cache file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisCache {
    /// Version, for compatibility checks
    version: u32,
    /// cache key → cached analysis
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Filters active when the entry was produced (informational; the
    /// key already encodes them)
    pub filters: Vec<String>,
    pub outcome: AnalysisOutcome,
}

impl AnalysisCache {
    const CURRENT_VERSION: u32 = 1;

    /// Load the cache from `dir`. Missing, corrupt or version-mismatched
    /// files are treated as empty.
    pub fn load(dir: &Path) -> Self {
        let cache_path = Self::cache_path(dir);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        match serde_json::from_reader::<_, AnalysisCache>(BufReader::new(file)) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            _ => Self::default(),
        }
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let file = File::create(Self::cache_path(dir))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn cache_path(dir: &Path) -> PathBuf {
        dir.join(CACHE_FILE_NAME)
    }

    /// Delete the cache file. Returns whether a file existed.
    pub fn clear(dir: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(dir);
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn get(&self, key: &str) -> Option<&AnalysisOutcome> {
        self.entries.get(key).map(|e| &e.outcome)
    }

    pub fn insert(&mut self, key: String, filters: Vec<String>, outcome: AnalysisOutcome) {
        self.entries.insert(key, CacheEntry { filters, outcome });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// Cache key: SHA-256 over the image bytes and the sorted filter labels.
pub fn cache_key(image: &CapturedImage, filters: &[String]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(&image.bytes);

    let mut sorted: Vec<&String> = filters.iter().collect();
    sorted.sort();
    for filter in sorted {
        hasher.update([0u8]);
        hasher.update(filter.as_bytes());
    }

    hex::encode(hasher.finalize())
}

/// Analyzer middleware that consults the cache before the wrapped
/// gateway and records fresh results after it.
pub struct CachedAnalyzer<G: IngredientAnalyzer> {
    inner: G,
    dir: PathBuf,
}

impl<G: IngredientAnalyzer> CachedAnalyzer<G> {
    pub fn new(inner: G, dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            dir: dir.into(),
        }
    }
}

impl<G: IngredientAnalyzer> IngredientAnalyzer for CachedAnalyzer<G> {
    async fn analyze(
        &self,
        image: &CapturedImage,
        filters: &[String],
    ) -> Result<AnalysisOutcome> {
        let key = cache_key(image, filters);
        let mut cache = AnalysisCache::load(&self.dir);

        if let Some(outcome) = cache.get(&key) {
            return Ok(outcome.clone());
        }

        let outcome = self.inner.analyze(image, filters).await?;
        cache.insert(key, filters.to_vec(), outcome.clone());
        cache.save(&self.dir)?;
        Ok(outcome)
    }
}
