//! Outbound calls to the media CDN: signed asset destruction and still-frame
//! retrieval. URL and signature derivation lives in `common::media`; this
//! module only performs the HTTP.

use std::collections::BTreeMap;

use common::media::{destroy_url, frame_url, sign_params};

use crate::config::MediaConfig;
use crate::error::AppError;

pub struct MediaClient<'a> {
    http: &'a reqwest::Client,
    config: &'a MediaConfig,
}

impl<'a> MediaClient<'a> {
    pub fn new(http: &'a reqwest::Client, config: &'a MediaConfig) -> Self {
        Self { http, config }
    }

    /// Issue a signed destroy request for a stored video asset.
    pub async fn destroy_video(&self, public_id: &str) -> Result<(), AppError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let mut params = BTreeMap::new();
        params.insert("public_id".to_string(), public_id.to_string());
        params.insert("timestamp".to_string(), timestamp.clone());
        let signature = sign_params(&params, &self.config.api_secret);

        let url = destroy_url(&self.config.api_base, &self.config.cloud_name);
        let response = self
            .http
            .post(&url)
            .form(&[
                ("public_id", public_id),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.config.api_key.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("CDN destroy request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "CDN destroy returned {} for '{}'",
                response.status(),
                public_id
            )));
        }

        Ok(())
    }

    /// Fetch one still frame at `second` into the video.
    ///
    /// Returns `None` on any failure; the Q&A assembler tolerates partial
    /// frame loss and decides itself when too many frames are missing.
    pub async fn fetch_frame(&self, public_id: &str, second: u32) -> Option<Vec<u8>> {
        let url = frame_url(
            &self.config.delivery_base,
            &self.config.cloud_name,
            public_id,
            second,
        );

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                response.bytes().await.ok().map(|b| b.to_vec())
            }
            Ok(response) => {
                tracing::debug!(
                    "Frame fetch for '{}' at {}s returned {}",
                    public_id,
                    second,
                    response.status()
                );
                None
            }
            Err(e) => {
                tracing::debug!("Frame fetch for '{}' at {}s failed: {}", public_id, second, e);
                None
            }
        }
    }
}
