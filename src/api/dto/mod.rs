//! Request and response DTOs for the REST API.
//!
//! Write DTOs derive `validator::Validate`; handlers call `.validate()`
//! before touching any service.

pub mod auth;
pub mod health;
pub mod ingredients;
pub mod pagination;
pub mod recipes;
pub mod subscriptions;
pub mod tags;
pub mod users;
