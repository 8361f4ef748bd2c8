use serde::{Deserialize, Serialize};

use crate::catalog::Video;
use crate::error::ValidationError;
use crate::validation::Validator;

/// Stable identifier of a catalog video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "video-{}", self.0)
    }
}

/// A user's saved reference to a video.
///
/// Carries its own copy of the video's presentation data, taken when the
/// favorite was created, since the backend cannot cheaply re-fetch the
/// original record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub item_id: ItemId,
    pub poster_url: String,
    pub duration_seconds: u32,
    pub stream_url: String,
    pub owner_display_name: String,
}

impl FavoriteItem {
    pub fn new(
        item_id: ItemId,
        poster_url: impl Into<String>,
        duration_seconds: u32,
        stream_url: impl Into<String>,
        owner_display_name: impl Into<String>,
    ) -> Self {
        Self {
            item_id,
            poster_url: poster_url.into(),
            duration_seconds,
            stream_url: stream_url.into(),
            owner_display_name: owner_display_name.into(),
        }
    }

    /// Build a snapshot from a catalog video, streaming its best file.
    pub fn from_video(video: &Video) -> Result<Self, ValidationError> {
        let stream_url = video
            .best_stream_url()
            .ok_or(ValidationError::NoPlayableFile(video.id))?;

        let item = Self::new(
            ItemId(video.id),
            video.image.clone(),
            video.duration,
            stream_url,
            video.user.name.clone(),
        );
        Validator::validate_item(&item)?;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{VideoFile, VideoOwner};

    fn make_video(files: Vec<VideoFile>) -> Video {
        Video {
            id: 42,
            image: "https://images.example.com/42.jpg".to_string(),
            duration: 31,
            user: VideoOwner {
                id: 7,
                name: "Ana".to_string(),
                url: "https://example.com/@ana".to_string(),
            },
            video_files: files,
        }
    }

    fn make_file(id: u64, quality: &str, link: &str) -> VideoFile {
        VideoFile {
            id,
            quality: quality.to_string(),
            file_type: "video/mp4".to_string(),
            link: link.to_string(),
        }
    }

    #[test]
    fn test_item_id_display() {
        assert_eq!(ItemId(10).to_string(), "video-10");
    }

    #[test]
    fn test_from_video_copies_snapshot() {
        let video = make_video(vec![
            make_file(1, "sd", "https://cdn.example.com/42-sd.mp4"),
            make_file(2, "hd", "https://cdn.example.com/42-hd.mp4"),
        ]);

        let item = FavoriteItem::from_video(&video).unwrap();

        assert_eq!(item.item_id, ItemId(42));
        assert_eq!(item.poster_url, "https://images.example.com/42.jpg");
        assert_eq!(item.duration_seconds, 31);
        assert_eq!(item.stream_url, "https://cdn.example.com/42-hd.mp4");
        assert_eq!(item.owner_display_name, "Ana");
    }

    #[test]
    fn test_from_video_without_files() {
        let video = make_video(Vec::new());

        assert_eq!(
            FavoriteItem::from_video(&video),
            Err(ValidationError::NoPlayableFile(42))
        );
    }
}
