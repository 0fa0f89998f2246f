//! DTOs for recipe endpoints.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::api::dto::tags::TagResponse;
use crate::api::dto::users::ProfileResponse;
use crate::domain::entities::{IngredientAmount, Recipe, RecipeDetails};
use crate::error::AppError;

/// One `(ingredient, amount)` pair of a write request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecipeIngredientDto {
    pub id: i64,

    #[validate(range(min = 1, max = 32767))]
    pub amount: u16,
}

/// Recipe creation request. The picture arrives inline as a base64
/// data URI.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    #[validate(length(min = 1, message = "At least one ingredient is required"))]
    #[validate(nested)]
    pub ingredients: Vec<RecipeIngredientDto>,

    #[validate(length(min = 1, message = "At least one tag is required"))]
    pub tags: Vec<i64>,

    #[validate(length(min = 1, message = "A recipe picture is required"))]
    pub image: String,

    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1))]
    pub text: String,

    #[validate(range(min = 1, max = 32767))]
    pub cooking_time: u16,
}

/// Recipe update request. Identical to creation except the picture may
/// be omitted to keep the stored one.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecipeRequest {
    #[validate(length(min = 1, message = "At least one ingredient is required"))]
    #[validate(nested)]
    pub ingredients: Vec<RecipeIngredientDto>,

    #[validate(length(min = 1, message = "At least one tag is required"))]
    pub tags: Vec<i64>,

    #[validate(length(min = 1, message = "A recipe picture is required"))]
    pub image: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1))]
    pub text: String,

    #[validate(range(min = 1, max = 32767))]
    pub cooking_time: u16,
}

/// An ingredient line of the read representation.
#[derive(Debug, Serialize)]
pub struct IngredientAmountResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i16,
}

impl From<IngredientAmount> for IngredientAmountResponse {
    fn from(item: IngredientAmount) -> Self {
        Self {
            id: item.id,
            name: item.name,
            measurement_unit: item.measurement_unit,
            amount: item.amount,
        }
    }
}

/// Full read representation of a recipe.
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub tags: Vec<TagResponse>,
    pub author: ProfileResponse,
    pub ingredients: Vec<IngredientAmountResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i16,
}

impl From<RecipeDetails> for RecipeResponse {
    fn from(details: RecipeDetails) -> Self {
        Self {
            id: details.recipe.id,
            tags: details.tags.into_iter().map(Into::into).collect(),
            author: details.author.into(),
            ingredients: details.ingredients.into_iter().map(Into::into).collect(),
            is_favorited: details.is_favorited,
            is_in_shopping_cart: details.is_in_shopping_cart,
            name: details.recipe.name,
            image: media_url(&details.recipe.image),
            text: details.recipe.text,
            cooking_time: details.recipe.cooking_time,
        }
    }
}

/// Trimmed representation used by favorite/cart responses and
/// subscription recipe lists.
#[derive(Debug, Serialize)]
pub struct RecipeMinResponse {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i16,
}

impl From<Recipe> for RecipeMinResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            image: media_url(&recipe.image),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Maps a stored media-relative path to its public URL.
pub fn media_url(path: &str) -> String {
    format!("/media/{path}")
}

/// Query parameters of the recipe list endpoint.
///
/// Parsed by hand because `tags` repeats
/// (`?tags=breakfast&tags=dinner`), which the standard `Query`
/// extractor cannot represent.
#[derive(Debug, Default)]
pub struct RecipeListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<i64>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl RecipeListParams {
    fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, AppError> {
        let mut params = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "page" => params.page = Some(parse_number(&key, &value)?),
                "limit" => params.limit = Some(parse_number(&key, &value)?),
                "author" => params.author = Some(parse_number(&key, &value)?),
                "tags" => params.tags.push(value),
                "is_favorited" => params.is_favorited = flag(&value),
                "is_in_shopping_cart" => params.is_in_shopping_cart = flag(&value),
                _ => {}
            }
        }

        Ok(params)
    }
}

fn parse_number<N: std::str::FromStr>(key: &str, value: &str) -> Result<N, AppError> {
    value.parse().map_err(|_| {
        AppError::bad_request(
            format!("Invalid value for '{key}'"),
            json!({ "value": value }),
        )
    })
}

fn flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

impl<S: Send + Sync> FromRequestParts<S> for RecipeListParams {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or("");
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).map_err(|e| {
            AppError::bad_request("Invalid query string", json!({ "reason": e.to_string() }))
        })?;

        Self::from_pairs(pairs)
    }
}
