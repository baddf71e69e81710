use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Process configuration, read once at startup and passed explicitly to the
/// components that need it. Every knob has a default so the binary runs
/// against a localhost llama-server with no environment set.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_base_url: String,
    pub llm_timeout: Duration,
    pub mealdb_base_url: String,
    /// Local JSON snapshot of the recipe store; ingested from the API on
    /// first run, reused afterwards.
    pub recipes_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            llm_base_url: env::var("CONVIVIO_LLM_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            llm_timeout: Duration::from_secs(
                env::var("CONVIVIO_LLM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            mealdb_base_url: env::var("CONVIVIO_MEALDB_URL")
                .unwrap_or_else(|_| "https://www.themealdb.com/api/json/v1/1".to_string()),
            recipes_path: env::var("CONVIVIO_RECIPES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("recipes.json")),
        }
    }
}
