use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid item_id {0}: must be positive")]
    InvalidItemId(u64),

    #[error("Missing {0}")]
    MissingUrl(&'static str),

    #[error("Invalid {0}: {1}")]
    InvalidUrl(&'static str, String),

    #[error("Owner name too long: {0} bytes (max 256)")]
    NameTooLong(usize),

    #[error("User id cannot be empty")]
    EmptyUserId,

    #[error("Video {0} has no playable file")]
    NoPlayableFile(u64),
}
