//! Repository traits defining data access contracts.
//!
//! Traits are `mockall::automock`ed under `cfg(test)` so services can be
//! unit-tested without a database; the PostgreSQL implementations live
//! in [`crate::infrastructure::persistence`].

pub mod ingredient_repository;
pub mod mark_repository;
pub mod recipe_repository;
pub mod subscription_repository;
pub mod tag_repository;
pub mod token_repository;
pub mod user_repository;

pub use ingredient_repository::IngredientRepository;
pub use mark_repository::MarkRepository;
pub use recipe_repository::RecipeRepository;
pub use subscription_repository::SubscriptionRepository;
pub use tag_repository::TagRepository;
pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
#[cfg(test)]
pub use mark_repository::MockMarkRepository;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
