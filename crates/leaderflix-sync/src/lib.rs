//! Leaderflix Sync - Favorites store and its remote gateway.

pub mod error;
pub mod gateway;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod protocol;
pub mod store;

pub use error::{FavoritesError, GatewayError};
pub use gateway::{FavoritesGateway, HttpFavoritesGateway};
pub use protocol::{AddFavoriteRequest, FavoriteRecord};
pub use store::{BulkRemoval, FavoritesStore, ToggleOutcome};

#[cfg(any(test, feature = "test-utils"))]
pub use memory::{GatewayCall, InMemoryFavoritesGateway};
