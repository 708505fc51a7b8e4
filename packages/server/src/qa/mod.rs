//! Contextual Q&A assembly: sample still frames from the CDN, build a
//! multimodal prompt around the video's metadata and the user's question, and
//! forward it to the inference API.
//!
//! Every call does full fresh work — no caching, no retries. Volumes are
//! per-user-interactive, not bulk.

mod inference;
pub mod prompt;

use common::media::frame_seconds;
use futures::future::join_all;

use crate::config::{InferenceConfig, MediaConfig};
use crate::entity::video;
use crate::error::AppError;
use crate::media::MediaClient;

pub use inference::FALLBACK_ANSWER;

/// Answer a free-text question about a stored video.
///
/// Individual frame-fetch failures are tolerated; the call fails with
/// `ExternalService` only when no frame at all could be retrieved, since the
/// prompt needs at least one image to ground the answer.
pub async fn answer_question(
    http: &reqwest::Client,
    media: &MediaConfig,
    inference: &InferenceConfig,
    video: &video::Model,
    question: &str,
) -> Result<String, AppError> {
    let client = MediaClient::new(http, media);
    let seconds = frame_seconds(video.duration);

    let fetches = seconds
        .iter()
        .map(|&second| client.fetch_frame(&video.public_id, second));
    let frames: Vec<Vec<u8>> = join_all(fetches).await.into_iter().flatten().collect();

    if frames.is_empty() {
        return Err(AppError::ExternalService(format!(
            "All frame fetches failed for video '{}'",
            video.public_id
        )));
    }

    tracing::debug!(
        "Assembled {} of {} frames for video '{}'",
        frames.len(),
        seconds.len(),
        video.public_id
    );

    let text = prompt::build(frames.len(), &video.title, &video.description, question);

    inference::generate(http, inference, &text, &frames).await
}
