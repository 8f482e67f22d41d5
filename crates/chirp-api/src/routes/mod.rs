//! Route definitions
//!
//! API routes are mounted under /api/v1; health probes sit at the root.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, feed, health, posts, users};
use crate::state::AppState;

/// API router (health is kept separate so it bypasses rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(feed_routes())
        .merge(post_routes())
        .merge(user_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

fn feed_routes() -> Router<AppState> {
    Router::new().route("/feed", get(feed::get_feed))
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id/like", post(posts::toggle_like))
        .route(
            "/posts/:post_id/comments",
            get(posts::list_comments).post(posts::add_comment),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/users/@me/posts", get(users::get_my_tickets))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/posts", get(users::get_user_posts))
        .route("/users/:user_id/followers", get(users::get_followers))
        .route("/users/:user_id/following", get(users::get_following))
        .route("/users/:user_id/follow-stats", get(users::get_follow_stats))
        .route("/users/:user_id/follow", post(users::toggle_follow))
}
