use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::config::InferenceConfig;
use crate::error::AppError;

/// Returned when the inference API answers with an unexpected response shape.
/// Shape surprises degrade gracefully; transport failures do not.
pub const FALLBACK_ANSWER: &str = "I couldn't find an answer in the video.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

// Every response field is optional: the assembler must survive shape drift
// from the upstream API without erroring.
#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn endpoint_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

/// Send one non-streaming generate request with the prompt text and the
/// retrieved frames as inline JPEG payloads.
pub async fn generate(
    http: &reqwest::Client,
    config: &InferenceConfig,
    prompt: &str,
    frames: &[Vec<u8>],
) -> Result<String, AppError> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| AppError::Misconfigured("inference API key is not set".into()))?;

    let mut parts = Vec::with_capacity(frames.len() + 1);
    parts.push(Part::Text {
        text: prompt.to_string(),
    });
    for frame in frames {
        parts.push(Part::Inline {
            inline_data: InlineData {
                mime_type: "image/jpeg",
                data: BASE64.encode(frame),
            },
        });
    }

    let payload = GenerateRequest {
        contents: vec![Content {
            role: "user",
            parts,
        }],
        generation_config: GenerationConfig {
            response_mime_type: "text/plain",
        },
    };

    // The key travels as a query parameter but never appears in the error
    // path: transport errors embed the request URL, which would otherwise
    // leak the secret into logs.
    let response = http
        .post(endpoint_url(&config.base_url, &config.model))
        .query(&[("key", api_key)])
        .json(&payload)
        .send()
        .await
        .map_err(|e| {
            AppError::ExternalService(format!("inference request failed: {}", e.without_url()))
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalService(format!(
            "inference API returned {status}: {body}"
        )));
    }

    let parsed: GenerateResponse = response
        .json()
        .await
        .map_err(|e| AppError::ExternalService(format!("inference response unreadable: {e}")))?;

    let answer = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .unwrap_or_else(|| FALLBACK_ANSWER.to_string());

    Ok(answer)
}
