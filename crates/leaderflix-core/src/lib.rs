//! Leaderflix Core - Domain models and validation.
//!
//! This crate holds the favorites data model shared by the sync store and
//! the catalog views. It has no dependencies on other Leaderflix crates.

pub mod catalog;
pub mod error;
pub mod favorites;
pub mod item;
pub mod session;
pub mod validation;

// Re-exports for convenience
pub use catalog::{Video, VideoFile, VideoOwner};
pub use error::ValidationError;
pub use favorites::FavoritesList;
pub use item::{FavoriteItem, ItemId};
pub use session::{Session, UserId};
pub use validation::Validator;
