//! Wire contract shared between the server and the upload client.
//!
//! All catalog endpoints speak camelCase JSON; the CDN's own upload response
//! ([`UploadReceipt`]) keeps the snake_case field names the CDN returns.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A catalog video record as returned by every read/write endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Opaque CDN asset reference. All playback/thumbnail/frame URLs derive
    /// from it. Immutable after creation.
    pub public_id: String,
    /// Byte count of the file the user selected, as a decimal string.
    pub original_size: String,
    /// Byte count stored by the CDN after transcoding, as a decimal string.
    pub compressed_size: String,
    /// Duration in seconds as reported by the CDN at upload time.
    pub duration: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owning principal. Immutable; drives all ownership checks.
    pub user_id: String,
}

/// Body of `POST /sign-upload`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUploadRequest {
    /// Upload parameters to sign, at minimum `folder` and `timestamp`.
    pub params_to_sign: BTreeMap<String, String>,
}

/// Response of `POST /sign-upload`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignUploadResponse {
    /// Hex signature over the requested parameters.
    pub signature: String,
    /// Public CDN API key the client must present alongside the signature.
    pub apikey: String,
}

/// Body of `POST /video-upload`, sent after a confirmed successful CDN upload.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Required; its absence means no confirmed upload exists.
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub original_size: Option<u64>,
    #[serde(default)]
    pub compressed_size: Option<u64>,
    /// Required; frame sampling cannot work without it.
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Body of `PATCH /videos/{id}`. Only title and description are mutable.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response of `DELETE /videos/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteVideoResponse {
    pub success: bool,
}

/// Body of `POST /ai/ask-question`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskQuestionRequest {
    pub video_id: Uuid,
    pub question: String,
}

/// Response of `POST /ai/ask-question`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AskQuestionResponse {
    pub answer: String,
}

/// The subset of the CDN upload response the pipeline consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub public_id: String,
    /// Stored size in bytes after the CDN's transcoding pass.
    pub bytes: u64,
    /// Duration in seconds derived by the CDN.
    pub duration: f64,
}
