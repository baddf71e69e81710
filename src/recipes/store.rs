use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::recipes::types::Recipe;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("recipe store I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("recipe store serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Read/query surface of the recipe database.
///
/// The dialogue schema snapshots its allow-lists from here at construction,
/// and the orchestrator resolves recommendations and by-name lookups
/// through it.
pub trait RecipeStore {
    fn insert(&mut self, recipe: Recipe);
    fn all(&self) -> Vec<&Recipe>;
    /// Case-insensitive substring match on the recipe name.
    fn by_name(&self, name: &str) -> Vec<&Recipe>;
    /// Conjunctive filter. `None` and empty criteria do not constrain; a
    /// recipe matches the ingredient list only if it contains every
    /// requested ingredient. All comparisons are case-insensitive.
    fn filter(
        &self,
        area: Option<&str>,
        category: Option<&str>,
        ingredients: &[String],
    ) -> Vec<&Recipe>;
    /// Distinct non-empty categories, sorted.
    fn categories(&self) -> Vec<String>;
    /// Distinct non-empty areas, sorted.
    fn areas(&self) -> Vec<String>;
    /// Distinct non-empty ingredient names across all recipes, sorted.
    fn ingredient_names(&self) -> Vec<String>;
}

/// In-memory implementation backing a single process.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecipeStore {
    recipes: Vec<Recipe>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        let mut store = Self::new();
        for recipe in recipes {
            store.insert(recipe);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Loads a previously saved snapshot.
    pub fn load_json(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        let recipes: Vec<Recipe> = serde_json::from_str(&content)?;
        Ok(Self::with_recipes(recipes))
    }

    pub fn save_json(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.recipes)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl RecipeStore for InMemoryRecipeStore {
    fn insert(&mut self, recipe: Recipe) {
        // Dedupe on the source id; the external API repeats entries.
        if self.recipes.iter().any(|r| r.id == recipe.id) {
            return;
        }
        self.recipes.push(recipe);
    }

    fn all(&self) -> Vec<&Recipe> {
        self.recipes.iter().collect()
    }

    fn by_name(&self, name: &str) -> Vec<&Recipe> {
        let needle = name.to_lowercase();
        self.recipes
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .collect()
    }

    fn filter(
        &self,
        area: Option<&str>,
        category: Option<&str>,
        ingredients: &[String],
    ) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| {
                let area_ok = area.map_or(true, |a| {
                    recipe
                        .area
                        .as_deref()
                        .is_some_and(|have| have.eq_ignore_ascii_case(a))
                });
                let category_ok = category.map_or(true, |c| {
                    recipe
                        .category
                        .as_deref()
                        .is_some_and(|have| have.eq_ignore_ascii_case(c))
                });
                let ingredients_ok = ingredients.iter().all(|wanted| {
                    recipe
                        .ingredients
                        .iter()
                        .any(|have| have.eq_ignore_ascii_case(wanted))
                });
                area_ok && category_ok && ingredients_ok
            })
            .collect()
    }

    fn categories(&self) -> Vec<String> {
        distinct(self.recipes.iter().filter_map(|r| r.category.clone()))
    }

    fn areas(&self) -> Vec<String> {
        distinct(self.recipes.iter().filter_map(|r| r.area.clone()))
    }

    fn ingredient_names(&self) -> Vec<String> {
        distinct(self.recipes.iter().flat_map(|r| r.ingredients.iter().cloned()))
    }
}

fn distinct<I: IntoIterator<Item = String>>(values: I) -> Vec<String> {
    let set: BTreeSet<String> = values
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .collect();
    set.into_iter().collect()
}
