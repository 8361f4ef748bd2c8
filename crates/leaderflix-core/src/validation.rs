use crate::error::ValidationError;
use crate::item::FavoriteItem;

/// Maximum length of an owner display name, in bytes.
pub const MAX_NAME_LEN: usize = 256;

/// Validator for favorite snapshots.
pub struct Validator;

impl Validator {
    /// Validate item_id. Zero is never issued by the catalog.
    pub fn validate_item_id(item_id: u64) -> Result<(), ValidationError> {
        if item_id == 0 {
            return Err(ValidationError::InvalidItemId(item_id));
        }
        Ok(())
    }

    /// Validate a URL field.
    /// Must be non-empty, absolute http(s), and free of whitespace.
    pub fn validate_url(field: &'static str, url: &str) -> Result<(), ValidationError> {
        if url.is_empty() {
            return Err(ValidationError::MissingUrl(field));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ValidationError::InvalidUrl(
                field,
                format!("not an http(s) URL: {}", url),
            ));
        }
        if url.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidUrl(
                field,
                format!("contains whitespace: {}", url),
            ));
        }
        Ok(())
    }

    /// Validate owner display name. May be empty, max 256 bytes.
    pub fn validate_owner_name(name: &str) -> Result<(), ValidationError> {
        if name.len() > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong(name.len()));
        }
        Ok(())
    }

    /// Validate a complete snapshot.
    pub fn validate_item(item: &FavoriteItem) -> Result<(), ValidationError> {
        Self::validate_item_id(item.item_id.0)?;
        Self::validate_url("poster_url", &item.poster_url)?;
        Self::validate_url("stream_url", &item.stream_url)?;
        Self::validate_owner_name(&item.owner_display_name)?;
        Ok(())
    }
}
