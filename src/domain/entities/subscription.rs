//! Subscription (follow) relationship entities.

use crate::domain::entities::recipe::Recipe;
use crate::domain::entities::user::User;

/// One entry of the subscriptions page: a followed author with a
/// trimmed list of their recipes and the full count.
#[derive(Debug, Clone)]
pub struct AuthorWithRecipes {
    pub author: User,
    pub recipes: Vec<Recipe>,
    pub recipes_count: i64,
}
