use common::types::{CreateVideoRequest, UpdateVideoRequest, VideoRecord};

use crate::entity::video;
use crate::error::AppError;

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation(
            "Title must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_video(req: &CreateVideoRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;

    // A record without a CDN reference or duration is useless to every
    // consumer downstream; refuse to create one.
    match req.public_id.as_deref() {
        Some(id) if !id.trim().is_empty() => {}
        _ => return Err(AppError::Validation("Missing video metadata: publicId".into())),
    }
    match req.duration {
        Some(d) if d.is_finite() => {}
        _ => return Err(AppError::Validation("Missing video metadata: duration".into())),
    }
    Ok(())
}

pub fn validate_update_video(req: &UpdateVideoRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    Ok(())
}

impl From<video::Model> for VideoRecord {
    fn from(m: video::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            public_id: m.public_id,
            original_size: m.original_size,
            compressed_size: m.compressed_size,
            duration: m.duration,
            created_at: m.created_at,
            updated_at: m.updated_at,
            user_id: m.user_id,
        }
    }
}
