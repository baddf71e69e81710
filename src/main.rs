use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use convivio::config::Config;
use convivio::nlu::prompts::Prompts;
use convivio::orchestrator::TurnOrchestrator;
use convivio::recipes::ingest::MealDbClient;
use convivio::recipes::store::InMemoryRecipeStore;
use convivio::services::llm::client::LlamaServerClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("convivio booting");

    let config = Config::from_env();

    let store = load_or_ingest(&config).await?;
    info!(recipes = store.len(), "recipe store ready");

    let model = LlamaServerClient::new(config.llm_base_url.clone(), config.llm_timeout);
    let mut orchestrator = TurnOrchestrator::new(model, store, Prompts::default());
    info!(session = %orchestrator.session_id(), "conversation open; Ctrl+D to stop");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("User: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let user_input = line.trim();
        if user_input.is_empty() {
            continue;
        }

        let outcome = orchestrator.run_turn(user_input).await;
        println!("{}", outcome.reply);

        if outcome.ended {
            break;
        }
    }

    info!("conversation closed");
    Ok(())
}

/// Reuses the local recipe snapshot when present, otherwise seeds the store
/// from the recipe API and saves the snapshot for the next run.
async fn load_or_ingest(config: &Config) -> Result<InMemoryRecipeStore> {
    if config.recipes_path.exists() {
        let store = InMemoryRecipeStore::load_json(&config.recipes_path)?;
        return Ok(store);
    }

    let client = MealDbClient::new(config.mealdb_base_url.clone());
    let recipes = client.fetch_meals("").await?;
    let store = InMemoryRecipeStore::with_recipes(recipes);

    if let Err(e) = store.save_json(&config.recipes_path) {
        warn!(error = %e, path = %config.recipes_path.display(), "could not save recipe snapshot");
    }
    Ok(store)
}
