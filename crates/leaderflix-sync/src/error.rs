use thiserror::Error;

use leaderflix_core::{ItemId, ValidationError};

/// Failure talking to the favorites backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors surfaced by the favorites store.
#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("No active session")]
    Unauthenticated,

    #[error("Failed to fetch favorites: {0}")]
    TransientFetch(#[source] GatewayError),

    #[error("Failed to toggle favorite {item_id}: {source}")]
    ToggleFailed {
        item_id: ItemId,
        #[source]
        source: GatewayError,
    },

    #[error("Toggle already in progress for {0}")]
    ToggleInProgress(ItemId),

    #[error("Failed to remove {} of {} favorites", .failed.len(), .failed.len() + .removed.len())]
    PartialBulkFailure {
        removed: Vec<ItemId>,
        failed: Vec<ItemId>,
    },

    #[error("Load superseded by a newer load")]
    Superseded,

    #[error("Invalid favorite: {0}")]
    InvalidItem(#[from] ValidationError),
}
