use crate::ai_provider::AiProvider;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fridgechef")]
#[command(about = "Fridge photo analysis and recipe cooking assistant", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AI provider (gemini/claude)
    #[arg(long, default_value = "gemini", global = true)]
    pub ai_provider: AiProvider,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a fridge photo and save recipe suggestions as JSON
    Analyze {
        /// Photo of the fridge or pantry contents
        #[arg(required = true)]
        image: PathBuf,

        /// Dietary filter, repeatable
        /// (Vegetarian/Vegan/Keto/Gluten-Free/Dairy-Free/Paleo)
        #[arg(short, long)]
        filter: Vec<String>,

        /// Output JSON file (default: recipes.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reuse cached results for the same photo and filters
        #[arg(long)]
        use_cache: bool,
    },

    /// List recipes from a saved analysis, optionally filtered
    Recipes {
        /// Analysis result JSON file
        #[arg(required = true)]
        input: PathBuf,

        /// Dietary filter, repeatable
        #[arg(short, long)]
        filter: Vec<String>,
    },

    /// Cook a recipe step by step with voice narration
    Cook {
        /// Analysis result JSON file
        #[arg(required = true)]
        input: PathBuf,

        /// Recipe title (exact match)
        #[arg(short, long)]
        title: Option<String>,

        /// Recipe number as shown by `recipes` (1-based)
        #[arg(short = 'n', long)]
        index: Option<usize>,
    },

    /// Show and edit the shopping list
    Shopping {
        /// Toggle an item's checked state by id
        #[arg(long)]
        toggle: Option<String>,

        /// Remove an item by id
        #[arg(long)]
        remove: Option<String>,

        /// Remove every checked item
        #[arg(long)]
        clear_completed: bool,
    },

    /// Show or edit settings
    Config {
        /// Set the model passed to the provider CLI
        #[arg(long)]
        set_model: Option<String>,

        /// Set the downscale limit for submitted photos (px)
        #[arg(long)]
        set_max_image_size: Option<u32>,

        /// Set the speech command used for narration
        #[arg(long)]
        set_speech_command: Option<String>,

        /// Show settings
        #[arg(long)]
        show: bool,
    },

    /// Analysis cache management
    Cache {
        /// Delete the cache
        #[arg(long)]
        clear: bool,

        /// Show cache info
        #[arg(long)]
        info: bool,
    },
}
