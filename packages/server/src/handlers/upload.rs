use axum::Json;
use axum::extract::State;
use common::media::sign_params;
use common::types::{SignUploadRequest, SignUploadResponse};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/sign-upload",
    tag = "Upload",
    operation_id = "signUpload",
    summary = "Sign parameters for a direct-to-CDN upload",
    description = "Signs the given upload parameters (at minimum `folder` and `timestamp`) with \
        the CDN API secret so the client can upload straight to the CDN. The secret itself never \
        leaves the server.",
    request_body = SignUploadRequest,
    responses(
        (status = 200, description = "Signature issued", body = SignUploadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id))]
pub async fn sign_upload(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignUploadRequest>,
) -> Result<Json<SignUploadResponse>, AppError> {
    if payload.params_to_sign.is_empty() {
        return Err(AppError::Validation("paramsToSign must not be empty".into()));
    }

    let signature = sign_params(&payload.params_to_sign, &state.config.media.api_secret);

    Ok(Json(SignUploadResponse {
        signature,
        apikey: state.config.media.api_key.clone(),
    }))
}
