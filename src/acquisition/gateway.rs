//! Ingredient analysis gateway
//!
//! The external collaborator that turns a fridge photo plus dietary
//! filters into structured recipes. The production implementation shells
//! out to an AI provider CLI: the image is written to a temp file, the
//! prompt references it, and the response is parsed and validated before
//! anything reaches the selection layer.

use crate::ai_provider::AiProvider;
use crate::error::{FridgeChefError, Result};
use super::CapturedImage;
use fridgechef_common::{
    build_analysis_prompt, parse_analysis_response, validate_outcome, AnalysisOutcome,
};
use std::path::PathBuf;
use std::process::Command;

/// Converts an image plus dietary constraints into recipes and detected
/// ingredients. Implementations own their transport; every failure mode
/// (transport, parse, schema) surfaces as one analysis error.
#[allow(async_fn_in_trait)]
pub trait IngredientAnalyzer {
    async fn analyze(
        &self,
        image: &CapturedImage,
        filters: &[String],
    ) -> Result<AnalysisOutcome>;
}

/// Gateway backed by an AI provider CLI (`gemini` / `claude`).
pub struct CliAnalyzer {
    provider: AiProvider,
    model: String,
    verbose: bool,
}

impl CliAnalyzer {
    pub fn new(provider: AiProvider, model: impl Into<String>, verbose: bool) -> Self {
        Self {
            provider,
            model: model.into(),
            verbose,
        }
    }
}

impl IngredientAnalyzer for CliAnalyzer {
    async fn analyze(
        &self,
        image: &CapturedImage,
        filters: &[String],
    ) -> Result<AnalysisOutcome> {
        let image_path = write_temp_image(image)?;
        let image_ref = image_path.display().to_string().replace('\\', "/");

        let prompt = build_analysis_prompt(&image_ref, filters);
        // newlines flattened so the prompt survives cmd-style quoting
        let flat_prompt = prompt.replace('\n', " ").replace('"', "\\\"");

        if self.verbose {
            println!("  [analyze] prompt length: {} chars", flat_prompt.len());
        }

        let response = run_provider_cli(self.provider, &self.model, &flat_prompt, self.verbose);
        let _ = std::fs::remove_file(&image_path);
        let response = response?;

        if self.verbose {
            println!("  [analyze] response length: {} chars", response.len());
        }

        let outcome = parse_analysis_response(&response)?;
        validate_outcome(&outcome)?;
        Ok(outcome)
    }
}

fn write_temp_image(image: &CapturedImage) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join("fridgechef");
    std::fs::create_dir_all(&dir)?;

    let name = format!(
        "capture-{}.{}",
        &image.content_hash()[..16],
        image.extension()
    );
    let path = dir.join(name);
    std::fs::write(&path, &image.bytes)?;
    Ok(path)
}

fn run_provider_cli(
    provider: AiProvider,
    model: &str,
    prompt: &str,
    verbose: bool,
) -> Result<String> {
    let mut args: Vec<&str> = vec!["-p", prompt];
    match provider {
        AiProvider::Claude => {
            args.extend(["--output-format", "text", "--model", model]);
        }
        AiProvider::Gemini => {
            args.extend(["--model", model]);
        }
    }

    #[cfg(windows)]
    let output = Command::new("cmd")
        .arg("/c")
        .arg(provider.command_name())
        .args(&args)
        .output()
        .map_err(|e| FridgeChefError::ApiCall(format!("provider CLI spawn error: {}", e)))?;

    #[cfg(not(windows))]
    let output = Command::new(provider.command_name())
        .args(&args)
        .output()
        .map_err(|e| FridgeChefError::ApiCall(format!("provider CLI spawn error: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FridgeChefError::ApiCall(format!(
            "{} CLI failed (code {:?}): {}",
            provider.command_name(),
            output.status.code(),
            stderr.trim()
        )));
    }

    let response = String::from_utf8_lossy(&output.stdout).to_string();

    if verbose {
        let preview: String = response.chars().take(500).collect();
        println!("  [analyze] response preview: {}", preview);
    }

    Ok(response)
}
