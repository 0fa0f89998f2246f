//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation
//! inputs use separate `New*` structs; viewer-scoped assemblies
//! ([`Profile`], [`RecipeDetails`]) carry the per-caller flags the API
//! exposes.

pub mod ingredient;
pub mod recipe;
pub mod subscription;
pub mod tag;
pub mod user;

pub use ingredient::{Ingredient, IngredientAmount, NewIngredient, ShoppingListItem};
pub use recipe::{
    MarkKind, NewRecipe, Recipe, RecipeDetails, RecipeFilter, RecipeIngredientInput, RecipeUpdate,
};
pub use subscription::AuthorWithRecipes;
pub use tag::{NewTag, Tag};
pub use user::{Credentials, NewUser, Profile, User};
