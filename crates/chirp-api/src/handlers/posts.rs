//! Post handlers
//!
//! Check-in creation, detail, likes and comments.

use axum::{
    extract::{Path, State},
    Json,
};
use chirp_service::{
    CommentResponse, CommentService, CreateCommentRequest, CreatePostRequest, LikeService,
    LikeToggleRequest, LikeToggleResponse, PostResponse, PostService,
};

use crate::extractors::{AuthUser, OptionalAuthUser, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a check-in post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(auth.user_id, request).await?;
    Ok(Created(Json(post)))
}

/// Get a post by ID
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<PostResponse>> {
    let post_id = path.post_id()?;

    let service = PostService::new(state.service_context());
    let post = service.get_post(auth.user_id(), post_id).await?;
    Ok(Json(post))
}

/// Toggle the viewer's like. The body carries the state the client
/// currently shows; the response carries the state after the write.
///
/// POST /posts/{post_id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<LikeToggleRequest>,
) -> ApiResult<Json<LikeToggleResponse>> {
    let post_id = path.post_id()?;

    let service = LikeService::new(state.service_context());
    let response = service
        .toggle_like(auth.user_id, post_id, request.is_liked)
        .await?;
    Ok(Json(response))
}

/// List comments on a post, oldest first
///
/// GET /posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let post_id = path.post_id()?;

    let service = CommentService::new(state.service_context());
    let comments = service.list_comments(post_id).await?;
    Ok(Json(comments))
}

/// Comment on a post
///
/// POST /posts/{post_id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let post_id = path.post_id()?;

    let service = CommentService::new(state.service_context());
    let comment = service.add_comment(auth.user_id, post_id, request).await?;
    Ok(Created(Json(comment)))
}
