use axum::Json;
use axum::extract::State;
use common::types::{AskQuestionRequest, AskQuestionResponse};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::video::find_video;
use crate::qa;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/ai/ask-question",
    tag = "AI",
    operation_id = "askQuestion",
    summary = "Ask a question about a video",
    description = "Samples five still frames from the video at proportional offsets, builds a \
        multimodal prompt from the video metadata and the question, and forwards it to the \
        inference API. Tolerates partial frame loss but requires at least one frame.",
    request_body = AskQuestionRequest,
    responses(
        (status = 200, description = "Answer generated", body = AskQuestionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Collaborator failure (EXTERNAL_SERVICE_ERROR, SERVER_MISCONFIGURED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id, video_id = %payload.video_id))]
pub async fn ask_question(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<AskQuestionRequest>,
) -> Result<Json<AskQuestionResponse>, AppError> {
    if payload.question.trim().is_empty() {
        return Err(AppError::Validation("Question is required".into()));
    }

    let video = find_video(&state.db, payload.video_id).await?;

    let answer = qa::answer_question(
        &state.http,
        &state.config.media,
        &state.config.inference,
        &video,
        payload.question.trim(),
    )
    .await?;

    Ok(Json(AskQuestionResponse { answer }))
}
