//! Test fixtures and data generators
//!
//! Request builders and the response shapes the tests read back.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix for test data; the clock part keeps reruns against the
/// same database from colliding
pub fn unique_suffix() -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}{n}", Utc::now().timestamp_millis() % 100_000_000)
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

impl RegisterRequest {
    /// A fresh account whose username starts with `prefix`
    pub fn named(prefix: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("{prefix}_{suffix}"),
            email: format!("{prefix}{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            full_name: Some(format!("{prefix} tester")),
        }
    }

    pub fn unique() -> Self {
        Self::named("user")
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: ProfileResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ============================================================================
// Profiles
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileSummary {
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserSummaryResponse {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct FollowStatsResponse {
    pub followers: i64,
    pub following: i64,
}

#[derive(Debug, Deserialize)]
pub struct ProfilePageResponse {
    pub profile: ProfileResponse,
    pub stats: FollowStatsResponse,
    pub is_following: bool,
}

// ============================================================================
// Posts
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub event_type: String,
    pub image_url: String,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub content: Option<String>,
}

impl CreatePostRequest {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            event_type: "musical".to_string(),
            image_url: "https://images.example.com/ticket.jpg".to_string(),
            event_date: Utc::now() - Duration::days(1),
            venue: "Richard Rodgers Theatre".to_string(),
            content: Some("Worth every penny".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub event_type: String,
    pub venue: String,
    pub created_at: DateTime<Utc>,
    pub profile: ProfileSummary,
    pub likes_count: i64,
    pub comments_count: i64,
    pub user_has_liked: bool,
}

#[derive(Debug, Serialize)]
pub struct LikeToggleRequest {
    pub is_liked: bool,
}

#[derive(Debug, Deserialize)]
pub struct LikeToggleResponse {
    pub liked: bool,
    pub likes_count: i64,
}

#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub profile: ProfileSummary,
}

// ============================================================================
// Follows
// ============================================================================

#[derive(Debug, Serialize)]
pub struct FollowToggleRequest {
    pub is_following: bool,
}

#[derive(Debug, Deserialize)]
pub struct FollowToggleResponse {
    pub following: bool,
    pub stats: FollowStatsResponse,
}
