//! DTOs for subscription endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::recipes::RecipeMinResponse;
use crate::domain::entities::AuthorWithRecipes;

/// A followed author with their recipes, as returned by the
/// subscriptions page and the subscribe action.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub recipes: Vec<RecipeMinResponse>,
    pub recipes_count: i64,
}

impl From<AuthorWithRecipes> for SubscriptionResponse {
    fn from(entry: AuthorWithRecipes) -> Self {
        Self {
            id: entry.author.id,
            email: entry.author.email,
            username: entry.author.username,
            first_name: entry.author.first_name,
            last_name: entry.author.last_name,
            // Every author in a subscription payload is followed by
            // definition.
            is_subscribed: true,
            recipes: entry.recipes.into_iter().map(Into::into).collect(),
            recipes_count: entry.recipes_count,
        }
    }
}

/// Query parameters for subscription endpoints: pagination plus the
/// per-author recipe list cap.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct SubscriptionParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub recipes_limit: Option<i64>,
}

/// Query parameters for the subscribe action.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct RecipesLimitParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub recipes_limit: Option<i64>,
}
