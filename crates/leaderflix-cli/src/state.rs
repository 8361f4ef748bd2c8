use std::sync::Arc;

use leaderflix_core::Session;
use leaderflix_sync::{FavoritesGateway, FavoritesStore, HttpFavoritesGateway};

/// Application state shared by every view of the session.
pub struct AppState<G: FavoritesGateway = HttpFavoritesGateway> {
    pub session: Option<Session>,
    pub favorites: Arc<FavoritesStore<G>>,
}

impl<G: FavoritesGateway> AppState<G> {
    pub fn new(session: Option<Session>, gateway: Arc<G>) -> Self {
        Self {
            session,
            favorites: Arc::new(FavoritesStore::new(gateway)),
        }
    }

    /// End the session and drop everything loaded for it.
    pub fn sign_out(&mut self) {
        self.session = None;
        self.favorites.reset();
    }
}
