//! Image acquisition and analysis control
//!
//! The flow from "user wants recipes" to "results on the board":
//! - `CapturedImage`: raw bytes + MIME type from the camera or a file
//! - `Acquisition`: the Idle → Capturing → Analyzing → ResultsReady/Failed
//!   controller, single gateway call in flight at a time
//! - `gateway`: the external analysis collaborator behind a trait
//! - `cache`: optional result cache keyed by image content + filters

pub mod cache;
pub mod gateway;

pub use cache::{AnalysisCache, CachedAnalyzer};
pub use gateway::{CliAnalyzer, IngredientAnalyzer};

use crate::error::{FridgeChefError, Result};
use crate::selection::RecipeBoard;
use fridgechef_common::AnalysisOutcome;
use sha2::{Digest, Sha256};
use std::path::Path;

const IMAGE_MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
];

/// Raw photo bytes plus their MIME type, as handed over by the camera or
/// file picker.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl CapturedImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Load from a file, inferring the MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FridgeChefError::ImageNotFound(path.display().to_string()));
        }

        let mime = mime_from_extension(path)
            .ok_or_else(|| FridgeChefError::UnsupportedImage(path.display().to_string()))?;

        let bytes = std::fs::read(path)
            .map_err(|e| FridgeChefError::ImageLoad(format!("{}: {}", path.display(), e)))?;

        Ok(Self::new(bytes, mime))
    }

    /// Downscale oversized photos before submission. Images whose longest
    /// side fits within `max_size`, and bytes that do not decode, pass
    /// through unchanged.
    pub fn prepare(self, max_size: u32) -> Self {
        let Ok(decoded) = image::load_from_memory(&self.bytes) else {
            return self;
        };

        if decoded.width().max(decoded.height()) <= max_size {
            return self;
        }

        let thumb = decoded.thumbnail(max_size, max_size).to_rgb8();
        let mut buf = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buf);
        if thumb.write_to(&mut cursor, image::ImageFormat::Jpeg).is_err() {
            return self;
        }

        Self {
            bytes: buf,
            mime_type: "image/jpeg".to_string(),
        }
    }

    /// SHA-256 of the image bytes, hex-encoded. Cache key material.
    pub fn content_hash(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }

    /// Base64 of the raw bytes, for inline-data gateway payloads.
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    /// File extension matching the MIME type, for temp-file hand-off.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        }
    }
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    IMAGE_MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionState {
    Idle,
    Capturing,
    Analyzing,
    ResultsReady,
    Failed,
}

/// Owns the home → capture → analyze transition. At most one gateway
/// call is in flight; a submission in any state other than `Capturing`
/// is rejected, never queued.
pub struct Acquisition<G: IngredientAnalyzer> {
    state: AcquisitionState,
    gateway: G,
}

impl<G: IngredientAnalyzer> Acquisition<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            state: AcquisitionState::Idle,
            gateway,
        }
    }

    pub fn state(&self) -> AcquisitionState {
        self.state
    }

    /// Start a capture. No effect while a capture or an analysis is
    /// already underway; from ResultsReady/Failed a new capture is fine.
    pub fn begin_capture(&mut self) -> bool {
        match self.state {
            AcquisitionState::Idle
            | AcquisitionState::ResultsReady
            | AcquisitionState::Failed => {
                self.state = AcquisitionState::Capturing;
                true
            }
            AcquisitionState::Capturing | AcquisitionState::Analyzing => false,
        }
    }

    /// Abort before submission. Only valid while Capturing; analysis is
    /// never cancelled mid-flight.
    pub fn cancel_capture(&mut self) -> bool {
        if self.state == AcquisitionState::Capturing {
            self.state = AcquisitionState::Idle;
            true
        } else {
            false
        }
    }

    /// Capturing → Analyzing. While a gateway call is already in flight
    /// the submission is rejected outright, never queued; outside a
    /// capture it is likewise rejected.
    pub fn start_analysis(&mut self) -> Result<()> {
        match self.state {
            AcquisitionState::Analyzing => Err(FridgeChefError::AnalysisInFlight),
            AcquisitionState::Capturing => {
                self.state = AcquisitionState::Analyzing;
                Ok(())
            }
            _ => Err(FridgeChefError::NotCapturing),
        }
    }

    /// Apply the gateway outcome of an analysis started with
    /// `start_analysis`. Success replaces the board's recipes and
    /// detected ingredients together, state → ResultsReady. Failure
    /// leaves the board untouched (prior results survive), state →
    /// Failed, and returns the error for a user-visible notice.
    pub fn finish_analysis(
        &mut self,
        result: Result<AnalysisOutcome>,
        board: &mut RecipeBoard,
    ) -> Result<()> {
        match result {
            Ok(outcome) => {
                board.replace_results(outcome);
                self.state = AcquisitionState::ResultsReady;
                Ok(())
            }
            Err(err) => {
                self.state = AcquisitionState::Failed;
                Err(err)
            }
        }
    }

    /// One full submission: start, single gateway call, finish.
    pub async fn submit_image(
        &mut self,
        image: &CapturedImage,
        filters: &[String],
        board: &mut RecipeBoard,
    ) -> Result<()> {
        self.start_analysis()?;
        let result = self.gateway.analyze(image, filters).await;
        self.finish_analysis(result, board)
    }
}
