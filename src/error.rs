use thiserror::Error;

#[derive(Error, Debug)]
pub enum FridgeChefError {
    #[error("Config error: {0}")]
    Config(String),

    // --- acquisition: recoverable, user falls back to another input path
    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Image load error: {0}")]
    ImageLoad(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedImage(String),

    // --- analysis: gateway call failed or returned invalid data
    #[error("Analysis call error: {0}")]
    ApiCall(String),

    #[error("Analysis response parse error: {0}")]
    ApiParse(String),

    #[error("Analysis returned invalid recipes: {0}")]
    InvalidRecipe(String),

    // --- single-flight guard: deterministic rejection, never queued
    #[error("An analysis is already in flight")]
    AnalysisInFlight,

    #[error("No capture in progress; call begin_capture first")]
    NotCapturing,

    // --- session misuse (construction only; in-session misuse is a no-op)
    #[error("Session error: {0}")]
    Session(String),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CLI interaction error: {0}")]
    CliExecution(String),
}

impl From<fridgechef_common::Error> for FridgeChefError {
    fn from(err: fridgechef_common::Error) -> Self {
        match err {
            fridgechef_common::Error::Io(e) => FridgeChefError::Io(e),
            fridgechef_common::Error::Json(e) => FridgeChefError::Json(e),
            fridgechef_common::Error::Parse(msg) => FridgeChefError::ApiParse(msg),
            fridgechef_common::Error::Validation(msg) => FridgeChefError::InvalidRecipe(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, FridgeChefError>;
