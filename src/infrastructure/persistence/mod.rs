//! PostgreSQL repository implementations.
//!
//! All queries are runtime-bound prepared statements; the only dynamic
//! SQL fragments are server-chosen table names and filter clauses built
//! with `QueryBuilder`, where every value is still a bound parameter.

pub mod pg_ingredient_repository;
pub mod pg_mark_repository;
pub mod pg_recipe_repository;
pub mod pg_subscription_repository;
pub mod pg_tag_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_ingredient_repository::PgIngredientRepository;
pub use pg_mark_repository::PgMarkRepository;
pub use pg_recipe_repository::PgRecipeRepository;
pub use pg_subscription_repository::PgSubscriptionRepository;
pub use pg_tag_repository::PgTagRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
