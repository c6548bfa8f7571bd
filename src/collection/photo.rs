//! Photo attachment: size limit, type sniffing, data-URL encoding

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::common::ApiError;

/// Largest accepted photo: 2 MiB
pub const MAX_PHOTO_BYTES: u64 = 2 * 1024 * 1024;

/// One uploaded file as received from the form
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: Option<String>,
    /// Size declared by the client (or measured on receipt)
    pub reported_size: u64,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("File is too large. Max 2 MB.")]
    TooLarge { size: u64 },
    #[error("Only image files can be attached")]
    NotAnImage,
    #[error("No photo file found")]
    Missing,
}

impl From<PhotoError> for ApiError {
    fn from(e: PhotoError) -> Self {
        match e {
            PhotoError::TooLarge { .. } => ApiError::PhotoTooLarge(e.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

/// Check the upload and render it as `data:<mime>;base64,<payload>`
pub fn encode_photo(upload: &PhotoUpload) -> Result<String, PhotoError> {
    let size = upload.reported_size.max(upload.bytes.len() as u64);
    if size > MAX_PHOTO_BYTES {
        return Err(PhotoError::TooLarge { size });
    }
    if upload.bytes.is_empty() {
        return Err(PhotoError::Missing);
    }

    let kind = infer::get(&upload.bytes)
        .filter(|k| k.matcher_type() == infer::MatcherType::Image)
        .ok_or(PhotoError::NotAnImage)?;

    Ok(format!(
        "data:{};base64,{}",
        kind.mime_type(),
        STANDARD.encode(&upload.bytes)
    ))
}
