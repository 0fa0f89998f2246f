//! HTTP middleware: authentication, rate limiting, tracing.

pub mod auth;
pub mod rate_limit;
pub mod tracing;

pub use auth::{CurrentUser, MaybeUser};
