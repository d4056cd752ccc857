//! User model and the in-memory user service.

pub mod seed;
pub mod store;
pub mod types;

pub use seed::{seed_users, SEED_COUNT};
pub use store::UserStore;
pub use types::{User, UserPatch};
