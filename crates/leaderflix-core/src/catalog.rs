use serde::{Deserialize, Serialize};

/// Quality tag the catalog uses for high-definition renditions.
pub const HD_QUALITY: &str = "hd";

/// One rendition of a catalog video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFile {
    pub id: u64,
    pub quality: String,
    pub file_type: String,
    pub link: String,
}

/// Uploader of a catalog video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoOwner {
    pub id: u64,
    pub name: String,
    pub url: String,
}

/// A video as returned by the catalog browse and search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: u64,
    pub image: String,
    pub duration: u32,
    pub user: VideoOwner,
    #[serde(default)]
    pub video_files: Vec<VideoFile>,
}

impl Video {
    /// Link of the first HD rendition, falling back to the first rendition.
    pub fn best_stream_url(&self) -> Option<String> {
        self.video_files
            .iter()
            .find(|f| f.quality == HD_QUALITY)
            .or_else(|| self.video_files.first())
            .map(|f| f.link.clone())
            .filter(|link| !link.is_empty())
    }
}
