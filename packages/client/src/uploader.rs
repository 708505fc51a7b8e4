use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use reqwest::blocking::multipart;

use common::media::upload_url;
use common::types::{CreateVideoRequest, UploadReceipt, VideoRecord};

use crate::api::ApiClient;
use crate::progress::ProgressReader;

/// Hard ceiling on the selected file size, checked before any network call.
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Pipeline phase, pushed to the observer as the upload advances.
///
/// `Done` and `Failed` are terminal; a retry is a fresh [`Uploader::upload`]
/// call, not a resumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Signing,
    Uploading(u8),
    Persisting,
    Done,
    Failed(String),
}

/// Callback receiving phase transitions and upload progress.
pub type Observer = Arc<dyn Fn(UploadPhase) + Send + Sync>;

pub struct UploadRequest<'p> {
    pub file: &'p Path,
    pub title: String,
    pub description: Option<String>,
}

/// Drives sign → direct CDN upload → catalog persist.
pub struct Uploader<'a> {
    api: &'a ApiClient,
    http: reqwest::blocking::Client,
    cloud_name: String,
    upload_folder: String,
    api_base: String,
}

impl<'a> Uploader<'a> {
    pub fn new(
        api: &'a ApiClient,
        cloud_name: &str,
        upload_folder: &str,
        api_base: &str,
    ) -> anyhow::Result<Self> {
        // No request timeout: large uploads on slow links take as long as
        // they take. Connect failures still surface quickly.
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(None)
            .build()
            .context("Failed to build CDN upload client")?;

        Ok(Self {
            api,
            http,
            cloud_name: cloud_name.to_string(),
            upload_folder: upload_folder.to_string(),
            api_base: api_base.to_string(),
        })
    }

    /// Run the full pipeline for one file. The observer sees every phase
    /// transition, ending in `Done` or `Failed`.
    pub fn upload(
        &self,
        req: &UploadRequest<'_>,
        observer: &Observer,
    ) -> anyhow::Result<VideoRecord> {
        match self.run(req, observer) {
            Ok(record) => {
                observer(UploadPhase::Done);
                Ok(record)
            }
            Err(err) => {
                observer(UploadPhase::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    fn run(&self, req: &UploadRequest<'_>, observer: &Observer) -> anyhow::Result<VideoRecord> {
        let len = std::fs::metadata(req.file)
            .with_context(|| format!("Failed to read {}", req.file.display()))?
            .len();
        ensure_within_limit(len)?;

        observer(UploadPhase::Signing);
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let mut params = BTreeMap::new();
        params.insert("folder".to_string(), self.upload_folder.clone());
        params.insert("timestamp".to_string(), timestamp.clone());
        let signed = self.api.sign_upload(params)?;

        observer(UploadPhase::Uploading(0));
        let receipt = self.send_to_cdn(req, len, &timestamp, &signed.apikey, &signed.signature, observer)?;

        observer(UploadPhase::Persisting);
        self.api.create_video(&CreateVideoRequest {
            title: req.title.clone(),
            description: req.description.clone(),
            public_id: Some(receipt.public_id),
            original_size: Some(len),
            compressed_size: Some(receipt.bytes),
            duration: Some(receipt.duration),
        })
    }

    fn send_to_cdn(
        &self,
        req: &UploadRequest<'_>,
        len: u64,
        timestamp: &str,
        api_key: &str,
        signature: &str,
        observer: &Observer,
    ) -> anyhow::Result<UploadReceipt> {
        let file = File::open(req.file)
            .with_context(|| format!("Failed to open {}", req.file.display()))?;

        let progress_observer = Arc::clone(observer);
        let reader = ProgressReader::new(file, len, move |percent| {
            progress_observer(UploadPhase::Uploading(percent));
        });

        let file_name = req
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let form = multipart::Form::new()
            .part(
                "file",
                multipart::Part::reader_with_length(reader, len).file_name(file_name),
            )
            .text("api_key", api_key.to_string())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature.to_string())
            .text("folder", self.upload_folder.clone());

        let res = self
            .http
            .post(upload_url(&self.api_base, &self.cloud_name))
            .multipart(form)
            .send()
            .context("Failed to reach the CDN")?;

        if !res.status().is_success() {
            bail!("CDN upload failed with status {}", res.status());
        }

        res.json().context("CDN returned an unexpected response")
    }
}

fn ensure_within_limit(len: u64) -> anyhow::Result<()> {
    if len > MAX_UPLOAD_BYTES {
        bail!(
            "File is {len} bytes, over the {} MiB upload limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_inclusive() {
        assert!(ensure_within_limit(MAX_UPLOAD_BYTES).is_ok());
        assert!(ensure_within_limit(MAX_UPLOAD_BYTES + 1).is_err());
    }

    #[test]
    fn limit_error_mentions_the_ceiling() {
        let err = ensure_within_limit(MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert!(err.to_string().contains("100 MiB"));
    }
}
