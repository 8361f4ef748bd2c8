use std::time::Duration;

use reqwest::{RequestBuilder, Response, Url};

use leaderflix_core::{FavoriteItem, ItemId, Session};

use crate::error::GatewayError;
use crate::protocol::{AddFavoriteRequest, FavoriteRecord};

/// Trait for the remote favorites backend.
///
/// The favorites store is the only caller.
pub trait FavoritesGateway: Send + Sync {
    /// Fetch every favorite of the session's user.
    fn list(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<Vec<FavoriteItem>, GatewayError>> + Send;

    /// Save a favorite for the session's user.
    fn add(
        &self,
        session: &Session,
        item: &FavoriteItem,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;

    /// Delete one favorite of the session's user.
    fn remove(
        &self,
        session: &Session,
        item_id: ItemId,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;
}

/// Favorites gateway over the Leaderflix REST API.
pub struct HttpFavoritesGateway {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFavoritesGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let base_url =
            Url::parse(base_url).map_err(|e| GatewayError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(request: RequestBuilder, session: &Session) -> Result<Response, GatewayError> {
        let response = request
            .bearer_auth(&session.token)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::Status(response.status().as_u16()));
        }

        Ok(response)
    }
}

impl FavoritesGateway for HttpFavoritesGateway {
    async fn list(&self, session: &Session) -> Result<Vec<FavoriteItem>, GatewayError> {
        let url = self.endpoint(&["favorites"])?;
        let request = self
            .client
            .get(url)
            .query(&[("userId", session.user_id.as_str())]);

        let body = Self::send(request, session)
            .await?
            .bytes()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let records: Vec<FavoriteRecord> =
            serde_json::from_slice(&body).map_err(|e| GatewayError::Decode(e.to_string()))?;

        Ok(records.into_iter().map(FavoriteItem::from).collect())
    }

    async fn add(&self, session: &Session, item: &FavoriteItem) -> Result<(), GatewayError> {
        let url = self.endpoint(&["favorites"])?;
        let body = AddFavoriteRequest::new(&session.user_id, item);

        Self::send(self.client.post(url).json(&body), session).await?;
        Ok(())
    }

    async fn remove(&self, session: &Session, item_id: ItemId) -> Result<(), GatewayError> {
        let video_id = item_id.0.to_string();
        let url = self.endpoint(&["favorites", session.user_id.as_str(), &video_id])?;

        Self::send(self.client.delete(url), session).await?;
        Ok(())
    }
}
