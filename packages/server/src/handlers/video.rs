use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::types::{CreateVideoRequest, DeleteVideoResponse, UpdateVideoRequest, VideoRecord};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::video;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::media::MediaClient;
use crate::models::video::{validate_create_video, validate_update_video};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/videos",
    tag = "Videos",
    operation_id = "listVideos",
    summary = "List all videos",
    description = "Returns every video record. The feed is public to all authenticated \
        principals; there is no ownership filter and no guaranteed ordering.",
    responses(
        (status = 200, description = "List of videos", body = Vec<VideoRecord>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_videos(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<VideoRecord>>, AppError> {
    let videos = video::Entity::find().all(&state.db).await?;
    Ok(Json(videos.into_iter().map(VideoRecord::from).collect()))
}

#[utoipa::path(
    post,
    path = "/video-upload",
    tag = "Videos",
    operation_id = "createVideo",
    summary = "Persist the catalog record for an uploaded video",
    description = "Called by the upload orchestrator after a confirmed successful CDN upload. \
        Fails with a validation error when `publicId` or `duration` is absent. The owning \
        principal is always taken from the session, never from the body.",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video record created", body = VideoRecord),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id, title = %payload.title))]
pub async fn create_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateVideoRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_video(&payload)?;

    let now = chrono::Utc::now();
    let new_video = video::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description.unwrap_or_default()),
        public_id: Set(payload.public_id.unwrap_or_default()),
        original_size: Set(payload.original_size.unwrap_or_default().to_string()),
        compressed_size: Set(payload.compressed_size.unwrap_or_default().to_string()),
        duration: Set(payload.duration.unwrap_or_default()),
        user_id: Set(auth_user.user_id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = new_video.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(VideoRecord::from(model))))
}

#[utoipa::path(
    patch,
    path = "/videos/{id}",
    tag = "Videos",
    operation_id = "updateVideo",
    summary = "Update a video's title and description",
    description = "Owner-only. Only `title` and `description` are mutable; `publicId`, \
        `userId`, sizes and duration can never change through this path.",
    params(("id" = Uuid, Path, description = "Video ID")),
    request_body = UpdateVideoRequest,
    responses(
        (status = 200, description = "Video updated", body = VideoRecord),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (NOT_OWNER)", body = ErrorBody),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id, id = %id))]
pub async fn update_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateVideoRequest>,
) -> Result<Json<VideoRecord>, AppError> {
    validate_update_video(&payload)?;

    let existing = find_video(&state.db, id).await?;
    auth_user.ensure_owner(&existing.user_id)?;

    let mut active: video::ActiveModel = existing.into();
    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/videos/{id}",
    tag = "Videos",
    operation_id = "deleteVideo",
    summary = "Delete a video",
    description = "Owner-only. Issues a best-effort destroy of the CDN asset before deleting \
        the catalog record; a failed CDN destroy is logged but does not fail the request.",
    params(("id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video deleted", body = DeleteVideoResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (NOT_OWNER)", body = ErrorBody),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id, id = %id))]
pub async fn delete_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteVideoResponse>, AppError> {
    let existing = find_video(&state.db, id).await?;
    auth_user.ensure_owner(&existing.user_id)?;

    // Best effort: a dangling CDN asset is preferable to a catalog record the
    // owner can never get rid of.
    if !existing.public_id.is_empty() {
        let media = MediaClient::new(&state.http, &state.config.media);
        if let Err(e) = media.destroy_video(&existing.public_id).await {
            tracing::warn!("CDN destroy failed for '{}': {:?}", existing.public_id, e);
        }
    }

    video::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(Json(DeleteVideoResponse { success: true }))
}

pub(crate) async fn find_video<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<video::Model, AppError> {
    video::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".into()))
}
