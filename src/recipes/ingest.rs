use std::time::Duration;

use anyhow::{anyhow, Result};
use serde_json::Value;
use tracing::info;

use crate::recipes::types::Recipe;

/// Client for TheMealDB search endpoint, used at startup to seed the
/// recipe store. Not consulted again once the store is populated.
pub struct MealDbClient {
    client: reqwest::Client,
    base_url: String,
}

impl MealDbClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
        }
    }

    /// Fetches every meal matching `query` (the empty string returns the
    /// API's default page) and flattens the `strIngredient1..20` columns
    /// into a single list.
    pub async fn fetch_meals(&self, query: &str) -> Result<Vec<Recipe>> {
        let url = format!("{}/search.php", self.base_url);
        let response = self.client.get(&url).query(&[("s", query)]).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("recipe API error: {}", response.status()));
        }

        let body: Value = response.json().await?;
        // The API returns `"meals": null` when nothing matches.
        let Some(meals) = body.get("meals").and_then(Value::as_array) else {
            return Ok(Vec::new());
        };

        let recipes: Vec<Recipe> = meals.iter().filter_map(parse_meal).collect();
        info!(count = recipes.len(), query, "ingested meals");
        Ok(recipes)
    }
}

fn parse_meal(meal: &Value) -> Option<Recipe> {
    let id = non_empty(meal.get("idMeal"))?;
    let name = non_empty(meal.get("strMeal"))?;

    let mut ingredients = Vec::new();
    for i in 1..=20 {
        if let Some(ingredient) = non_empty(meal.get(format!("strIngredient{i}"))) {
            ingredients.push(ingredient);
        }
    }

    Some(Recipe {
        id,
        name,
        category: non_empty(meal.get("strCategory")),
        area: non_empty(meal.get("strArea")),
        instructions: non_empty(meal.get("strInstructions")),
        thumbnail: non_empty(meal.get("strMealThumb")),
        tags: non_empty(meal.get("strTags")),
        youtube: non_empty(meal.get("strYoutube")),
        source: non_empty(meal.get("strSource")),
        ingredients,
    })
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
