use serde::{Deserialize, Serialize};

/// One recipe, as ingested from the external recipe API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Source identifier (TheMealDB `idMeal`), unique per recipe.
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub thumbnail: Option<String>,
    pub tags: Option<String>,
    pub youtube: Option<String>,
    pub source: Option<String>,
    /// Flattened ingredient names, blanks removed.
    pub ingredients: Vec<String>,
}
