use clap::ValueEnum;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AiProvider {
    Gemini,
    Claude,
}

impl AiProvider {
    pub fn command_name(&self) -> &'static str {
        match self {
            AiProvider::Gemini => "gemini",
            AiProvider::Claude => "claude",
        }
    }
}
