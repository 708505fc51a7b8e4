use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, bail};
use reqwest::blocking::{Client, Response};
use uuid::Uuid;

use common::types::{
    AskQuestionRequest, AskQuestionResponse, CreateVideoRequest, DeleteVideoResponse,
    SignUploadRequest, SignUploadResponse, UpdateVideoRequest, VideoRecord,
};

/// Authenticated client for the server's `/api/v1` endpoints.
pub struct ApiClient {
    base: String,
    token: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base: &str, token: &str) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base, path)
    }

    /// Turn a non-2xx response into an error carrying the server's message.
    fn check(res: Response) -> anyhow::Result<Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let text = res.text().unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(String::from))
            .unwrap_or(text);
        bail!("Server returned {status}: {message}")
    }

    pub fn sign_upload(
        &self,
        params_to_sign: BTreeMap<String, String>,
    ) -> anyhow::Result<SignUploadResponse> {
        let res = self
            .http
            .post(self.url("/sign-upload"))
            .bearer_auth(&self.token)
            .json(&SignUploadRequest { params_to_sign })
            .send()
            .context("Failed to reach the server")?;

        Ok(Self::check(res)?.json()?)
    }

    pub fn create_video(&self, req: &CreateVideoRequest) -> anyhow::Result<VideoRecord> {
        let res = self
            .http
            .post(self.url("/video-upload"))
            .bearer_auth(&self.token)
            .json(req)
            .send()
            .context("Failed to reach the server")?;

        Ok(Self::check(res)?.json()?)
    }

    pub fn list_videos(&self) -> anyhow::Result<Vec<VideoRecord>> {
        let res = self
            .http
            .get(self.url("/videos"))
            .bearer_auth(&self.token)
            .send()
            .context("Failed to reach the server")?;

        Ok(Self::check(res)?.json()?)
    }

    pub fn update_video(
        &self,
        id: Uuid,
        req: &UpdateVideoRequest,
    ) -> anyhow::Result<VideoRecord> {
        let res = self
            .http
            .patch(self.url(&format!("/videos/{id}")))
            .bearer_auth(&self.token)
            .json(req)
            .send()
            .context("Failed to reach the server")?;

        Ok(Self::check(res)?.json()?)
    }

    pub fn delete_video(&self, id: Uuid) -> anyhow::Result<DeleteVideoResponse> {
        let res = self
            .http
            .delete(self.url(&format!("/videos/{id}")))
            .bearer_auth(&self.token)
            .send()
            .context("Failed to reach the server")?;

        Ok(Self::check(res)?.json()?)
    }

    pub fn ask_question(&self, video_id: Uuid, question: &str) -> anyhow::Result<AskQuestionResponse> {
        let res = self
            .http
            .post(self.url("/ai/ask-question"))
            .bearer_auth(&self.token)
            .json(&AskQuestionRequest {
                video_id,
                question: question.to_string(),
            })
            .send()
            .context("Failed to reach the server")?;

        Ok(Self::check(res)?.json()?)
    }
}
