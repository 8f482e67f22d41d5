//! User handlers
//!
//! Profile settings, profile pages, per-user post lists and the follow graph.

use axum::{
    extract::{Path, State},
    Json,
};
use chirp_service::{
    FollowService, FollowStatsResponse, FollowToggleRequest, FollowToggleResponse, PostResponse,
    PostService, ProfilePageResponse, ProfileResponse, ProfileService, UpdateProfileRequest,
    UserSummaryResponse,
};

use crate::extractors::{AuthUser, OptionalAuthUser, Pagination, UserIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get current user's profile
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    let profile = service.current_profile(auth.user_id).await?;
    Ok(Json(profile))
}

/// Update current user's settings
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    let profile = service.update_profile(auth.user_id, request).await?;
    Ok(Json(profile))
}

/// The current user's own check-ins
///
/// GET /users/@me/posts
pub async fn get_my_tickets(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let posts = service.my_tickets(auth.user_id, pagination.query()).await?;
    Ok(Json(posts))
}

/// Profile page: profile, follow counts, and whether the viewer follows
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<ProfilePageResponse>> {
    let user_id = path.user_id()?;

    let service = ProfileService::new(state.service_context());
    let page = service.user_profile_page(auth.user_id(), user_id).await?;
    Ok(Json(page))
}

/// Posts by one user
///
/// GET /users/{user_id}/posts
pub async fn get_user_posts(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<UserIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let user_id = path.user_id()?;

    let service = PostService::new(state.service_context());
    let posts = service
        .user_posts(auth.user_id(), user_id, pagination.query())
        .await?;
    Ok(Json(posts))
}

/// GET /users/{user_id}/followers
pub async fn get_followers(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<Vec<UserSummaryResponse>>> {
    let user_id = path.user_id()?;

    let service = FollowService::new(state.service_context());
    Ok(Json(service.followers(user_id).await?))
}

/// GET /users/{user_id}/following
pub async fn get_following(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<Vec<UserSummaryResponse>>> {
    let user_id = path.user_id()?;

    let service = FollowService::new(state.service_context());
    Ok(Json(service.following(user_id).await?))
}

/// GET /users/{user_id}/follow-stats
pub async fn get_follow_stats(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<FollowStatsResponse>> {
    let user_id = path.user_id()?;

    let service = FollowService::new(state.service_context());
    Ok(Json(service.follow_stats(user_id).await?))
}

/// Follow or unfollow. The body carries the state the client currently
/// shows; following yourself is rejected with 400.
///
/// POST /users/{user_id}/follow
pub async fn toggle_follow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
    ValidatedJson(request): ValidatedJson<FollowToggleRequest>,
) -> ApiResult<Json<FollowToggleResponse>> {
    let user_id = path.user_id()?;

    let service = FollowService::new(state.service_context());
    let response = service
        .toggle_follow(auth.user_id, user_id, request.is_following)
        .await?;
    Ok(Json(response))
}
