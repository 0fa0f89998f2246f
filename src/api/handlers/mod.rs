//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod favorites;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod shopping_cart;
pub mod subscriptions;
pub mod tags;
pub mod users;

pub use auth::{login_handler, logout_handler};
pub use favorites::{favorite_handler, unfavorite_handler};
pub use health::health_handler;
pub use ingredients::{ingredient_detail_handler, ingredient_list_handler};
pub use recipes::{
    create_recipe_handler, delete_recipe_handler, recipe_detail_handler, recipe_list_handler,
    update_recipe_handler,
};
pub use shopping_cart::{
    download_shopping_cart_handler, shopping_cart_add_handler, shopping_cart_remove_handler,
};
pub use subscriptions::{subscribe_handler, subscriptions_handler, unsubscribe_handler};
pub use tags::{tag_detail_handler, tag_list_handler};
pub use users::{
    create_user_handler, me_handler, set_password_handler, user_detail_handler, user_list_handler,
};
