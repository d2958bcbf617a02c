use clap::Parser;
use fridgechef_rust::{acquisition, cli, config, cook, error, ratings, selection, shopping};

use acquisition::{
    Acquisition, AnalysisCache, CachedAnalyzer, CapturedImage, CliAnalyzer, IngredientAnalyzer,
};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use fridgechef_common::AnalysisOutcome;
use indicatif::ProgressBar;
use selection::RecipeBoard;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, filter, output, use_cache } => {
            println!("🧊 fridgechef - photo analysis\n");

            // 1. Load and downscale the photo
            println!("[1/3] Loading photo...");
            let captured = CapturedImage::from_path(&image)?.prepare(config.max_image_size);
            println!(
                "✔ {} ({} KB, {})\n",
                image.display(),
                captured.bytes.len() / 1024,
                captured.mime_type
            );

            // 2. AI analysis
            println!(
                "[2/3] Analyzing...{}",
                if use_cache { " (cache enabled)" } else { "" }
            );
            let spinner = ProgressBar::new_spinner();
            spinner.enable_steady_tick(Duration::from_millis(120));
            spinner.set_message("waiting for the AI provider");

            let analyzer = CliAnalyzer::new(cli.ai_provider, &config.model, cli.verbose);
            let mut board = RecipeBoard::new();
            board.set_filters(filter.clone());

            let result = if use_cache {
                let cached = CachedAnalyzer::new(analyzer, config.data_dir()?);
                run_analysis(cached, &captured, &filter, &mut board).await
            } else {
                run_analysis(analyzer, &captured, &filter, &mut board).await
            };
            spinner.finish_and_clear();
            result?;

            println!(
                "✔ {} recipe(s) from {} detected ingredient(s)\n",
                board.recipes().len(),
                board.detected_ingredients().len()
            );
            if cli.verbose {
                println!("  Detected: {}\n", board.detected_ingredients().join(", "));
            }

            // 3. Save
            println!("[3/3] Saving results...");
            let outcome = AnalysisOutcome {
                recipes: board.recipes().to_vec(),
                detected_ingredients: board.detected_ingredients().to_vec(),
            };
            let output = output.unwrap_or_else(|| PathBuf::from("recipes.json"));
            std::fs::write(&output, serde_json::to_string_pretty(&outcome)?)?;
            println!("✔ Saved: {}", output.display());

            println!("\n✅ Done");
        }

        Commands::Recipes { input, filter } => {
            println!("🍽 fridgechef - recipes\n");

            let outcome = load_outcome(&input)?;
            let mut board = RecipeBoard::new();
            board.set_filters(filter);
            board.replace_results(outcome);

            let stored_ratings = ratings::Ratings::load(&config.data_dir()?);

            if !board.detected_ingredients().is_empty() {
                println!("Detected: {}\n", board.detected_ingredients().join(", "));
            }
            if !board.active_filters().is_empty() {
                println!("Filters: {}\n", board.active_filters().join(" + "));
            }

            let visible = board.visible_recipes();
            if visible.is_empty() {
                println!("No recipes match the active filters");
            }
            for (i, recipe) in visible.iter().enumerate() {
                let rating = stored_ratings.get(&recipe.title);
                let stars = if rating > 0 {
                    format!("  {}", "★".repeat(rating as usize))
                } else {
                    String::new()
                };
                println!(
                    "{}. {} [{} | {} | {} kcal]{}",
                    i + 1,
                    recipe.title,
                    recipe.difficulty,
                    recipe.prep_time,
                    recipe.calories,
                    stars
                );
                if !recipe.dietary_tags.is_empty() {
                    println!("   tags: {}", recipe.dietary_tags.join(", "));
                }
                println!("   {}", recipe.description);
            }
        }

        Commands::Cook { input, title, index } => {
            let outcome = load_outcome(&input)?;
            let recipe = cook::select_recipe(&outcome.recipes, title.as_deref(), index)?;
            let data_dir = config.data_dir()?;
            cook::run_interactive_cooking(recipe, config.speech_command.clone(), &data_dir)?;
        }

        Commands::Shopping { toggle, remove, clear_completed } => {
            let data_dir = config.data_dir()?;
            let mut list = shopping::ShoppingList::load(&data_dir);
            let mut changed = false;

            if let Some(id) = toggle {
                if list.toggle(&id) {
                    changed = true;
                } else {
                    println!("No item with id {}", id);
                }
            }

            if let Some(id) = remove {
                if list.remove(&id) {
                    changed = true;
                    println!("✔ Removed {}", id);
                } else {
                    println!("No item with id {}", id);
                }
            }

            if clear_completed {
                let removed = list.clear_completed();
                println!("✔ Cleared {} completed item(s)", removed);
                changed = changed || removed > 0;
            }

            if changed {
                list.save(&data_dir)?;
            }

            println!(
                "\n🛒 Shopping list ({} open / {} total)\n",
                list.unchecked_count(),
                list.len()
            );
            if list.is_empty() {
                println!("  (empty)");
            }
            for item in list.items() {
                let mark = if item.checked { "x" } else { " " };
                let origin = item
                    .recipe_title
                    .as_deref()
                    .map(|t| format!("  (for {})", t))
                    .unwrap_or_default();
                println!("  [{}] {}  {}{}", mark, item.id, item.name, origin);
            }
        }

        Commands::Config { set_model, set_max_image_size, set_speech_command, show } => {
            let mut config = config;
            let mut dirty = false;

            if let Some(model) = set_model {
                config.model = model;
                dirty = true;
            }
            if let Some(size) = set_max_image_size {
                config.max_image_size = size;
                dirty = true;
            }
            if let Some(command) = set_speech_command {
                config.speech_command = Some(command);
                dirty = true;
            }
            if dirty {
                config.save()?;
                println!("✔ Settings saved");
            }

            if show || !dirty {
                println!("Settings:");
                println!("  model: {}", config.model);
                println!("  max image size: {}px", config.max_image_size);
                println!(
                    "  speech command: {}",
                    config.speech_command.as_deref().unwrap_or("(platform default)")
                );
                println!("  data dir: {}", config.data_dir()?.display());
            }
        }

        Commands::Cache { clear, info } => {
            let data_dir = config.data_dir()?;
            let cache_path = AnalysisCache::cache_path(&data_dir);

            if info || !clear {
                if cache_path.exists() {
                    let cache = AnalysisCache::load(&data_dir);
                    println!("Cache:");
                    println!("  path: {}", cache_path.display());
                    println!("  entries: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  size: {} bytes", meta.len());
                    }
                } else {
                    println!("No cache file: {}", cache_path.display());
                }
            }

            if clear {
                match AnalysisCache::clear(&data_dir) {
                    Ok(true) => println!("✔ Cache deleted: {}", cache_path.display()),
                    Ok(false) => println!("No cache file to delete"),
                    Err(e) => println!("Cache delete error: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// One capture → analyze round against a fresh controller.
async fn run_analysis<G: IngredientAnalyzer>(
    gateway: G,
    image: &CapturedImage,
    filters: &[String],
    board: &mut RecipeBoard,
) -> Result<()> {
    let mut acquisition = Acquisition::new(gateway);
    acquisition.begin_capture();
    acquisition.submit_image(image, filters, board).await
}

fn load_outcome(path: &Path) -> Result<AnalysisOutcome> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
