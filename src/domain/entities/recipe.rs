//! Recipe entity and its creation/update inputs.

use chrono::{DateTime, Utc};

use crate::domain::entities::ingredient::IngredientAmount;
use crate::domain::entities::tag::Tag;
use crate::domain::entities::user::{Profile, User};

/// A recipe row joined with its author.
///
/// `image` holds the media-root-relative path of the stored picture.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i64,
    pub author: User,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i16,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a recipe.
///
/// The recipe row, its tag links, and its ingredient links are written
/// in a single transaction.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub author_id: i64,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i16,
    pub tag_ids: Vec<i64>,
    pub ingredients: Vec<RecipeIngredientInput>,
}

/// Full update of a recipe. Tag and ingredient links are replaced,
/// not merged. `image: None` keeps the stored picture.
#[derive(Debug, Clone)]
pub struct RecipeUpdate {
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i16,
    pub tag_ids: Vec<i64>,
    pub ingredients: Vec<RecipeIngredientInput>,
}

/// One `(ingredient, amount)` pair of a create/update request.
#[derive(Debug, Clone, Copy)]
pub struct RecipeIngredientInput {
    pub ingredient_id: i64,
    pub amount: i16,
}

/// A recipe with every relation resolved for a specific viewer.
#[derive(Debug, Clone)]
pub struct RecipeDetails {
    pub recipe: Recipe,
    pub author: Profile,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<IngredientAmount>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Per-user recipe marker kind, backing the favorites list and the
/// shopping cart. Both share the same add/remove/lookup shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Favorite,
    ShoppingCart,
}

impl MarkKind {
    /// Human-readable noun used in error messages.
    pub fn noun(self) -> &'static str {
        match self {
            MarkKind::Favorite => "favorites",
            MarkKind::ShoppingCart => "shopping cart",
        }
    }
}

/// Filters accepted by the recipe list endpoint.
///
/// `tag_slugs` is OR-combined; the viewer-scoped flags are ignored for
/// anonymous callers.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub author_id: Option<i64>,
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<i64>,
    pub in_cart_of: Option<i64>,
}
