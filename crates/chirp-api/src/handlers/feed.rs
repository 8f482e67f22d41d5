//! Feed handler

use axum::{extract::State, Json};
use chirp_service::{FeedService, PostResponse};

use crate::extractors::{OptionalAuthUser, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// Home feed: the viewer's posts and those of everyone they follow
///
/// GET /feed?limit=&before=
///
/// Anonymous callers get `[]`.
pub async fn get_feed(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = FeedService::new(state.service_context());
    let posts = service.feed(auth.user_id(), pagination.query()).await?;
    Ok(Json(posts))
}
