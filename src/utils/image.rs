//! Recipe image decoding and storage.
//!
//! Clients submit pictures inline as base64 data URIs
//! (`data:image/png;base64,...`). Decoded bytes are written under the
//! media root and the stored path is returned for the database row.

use base64::Engine as _;
use rand::Rng;
use std::path::Path;

/// Image kinds accepted for recipe pictures, with their file extensions.
const ACCEPTED_TYPES: &[(&str, &str)] = &[("png", "png"), ("jpeg", "jpg"), ("gif", "gif")];

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image must be a base64 data URI")]
    InvalidFormat,
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("failed to store image: {0}")]
    Io(#[from] std::io::Error),
}

/// Splits a `data:image/<type>;base64,<payload>` string into decoded
/// bytes and the matching file extension.
pub fn decode_data_uri(data: &str) -> Result<(Vec<u8>, &'static str), ImageError> {
    let rest = data
        .strip_prefix("data:image/")
        .ok_or(ImageError::InvalidFormat)?;
    let (mime_subtype, payload) = rest
        .split_once(";base64,")
        .ok_or(ImageError::InvalidFormat)?;

    let ext = ACCEPTED_TYPES
        .iter()
        .find(|(subtype, _)| *subtype == mime_subtype)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| ImageError::UnsupportedType(mime_subtype.to_string()))?;

    let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;

    if bytes.is_empty() {
        return Err(ImageError::InvalidFormat);
    }

    Ok((bytes, ext))
}

/// Decodes a data URI and writes the picture under
/// `<media_root>/recipes/`, returning the media-root-relative path.
pub async fn store_data_uri(media_root: &Path, data: &str) -> Result<String, ImageError> {
    let (bytes, ext) = decode_data_uri(data)?;

    let dir = media_root.join("recipes");
    tokio::fs::create_dir_all(&dir).await?;

    let relative = format!("recipes/{}.{ext}", random_stem());
    tokio::fs::write(media_root.join(&relative), bytes).await?;

    Ok(relative)
}

/// Random 16-character hex stem for stored files.
fn random_stem() -> String {
    const HEX: &[u8] = b"0123456789abcdef";

    let mut rng = rand::rng();
    (0..16)
        .map(|_| HEX[rng.random_range(0..HEX.len())] as char)
        .collect()
}
