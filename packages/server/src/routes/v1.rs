use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::upload::sign_upload))
        .routes(routes!(handlers::video::list_videos))
        .routes(routes!(handlers::video::create_video))
        .routes(routes!(
            handlers::video::update_video,
            handlers::video::delete_video
        ))
        .routes(routes!(handlers::qa::ask_question))
}
