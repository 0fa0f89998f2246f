//! DTOs for ingredient endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Ingredient;

/// Query parameters for the ingredient list: case-insensitive name
/// prefix search.
#[derive(Debug, Deserialize)]
pub struct IngredientListParams {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}
