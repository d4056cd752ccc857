//! Example users route and in-memory user service.
//!
//! A route configuration for `/users` declares `GET` (list users) and `POST`
//! (add a user from an optional `name` string and optional `age` number).
//! Controllers validate request bodies against that declaration and call into
//! a [`UserStore`], which reseeds itself with a fixed dataset whenever it is
//! empty.
//!
//! ```text
//! request -> route config validates body -> controller -> UserStore
//!         <- JSON User / [User]          <- or {message, code} error
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Error types and error codes
//! - [`users`]: User model, seed dataset and store
//! - [`routes`]: Declarative route configuration and body validation
//! - [`api`]: HTTP handlers and router
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod users;
pub mod utils;

pub use config::Config;
pub use error::{AppError, ErrorCode, Result, UserError};
pub use users::{User, UserStore};
