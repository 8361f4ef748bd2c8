use serde::{Deserialize, Serialize};

use leaderflix_core::{FavoriteItem, ItemId, UserId};

/// A favorite as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub video_id: u64,
    pub image: String,
    pub duration: u32,
    pub video_url: String,
    pub user_name: String,
}

impl From<FavoriteRecord> for FavoriteItem {
    fn from(record: FavoriteRecord) -> Self {
        FavoriteItem::new(
            ItemId(record.video_id),
            record.image,
            record.duration,
            record.video_url,
            record.user_name,
        )
    }
}

impl From<&FavoriteItem> for FavoriteRecord {
    fn from(item: &FavoriteItem) -> Self {
        Self {
            video_id: item.item_id.0,
            image: item.poster_url.clone(),
            duration: item.duration_seconds,
            video_url: item.stream_url.clone(),
            user_name: item.owner_display_name.clone(),
        }
    }
}

/// Body of `POST /favorites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(flatten)]
    pub record: FavoriteRecord,
}

impl AddFavoriteRequest {
    pub fn new(user_id: &UserId, item: &FavoriteItem) -> Self {
        Self {
            user_id: user_id.as_str().to_string(),
            record: FavoriteRecord::from(item),
        }
    }
}
