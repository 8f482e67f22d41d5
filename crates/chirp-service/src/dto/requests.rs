//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chirp_core::entities::{EventType, PostDraft};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::{Validate, ValidateUrl, ValidationError};

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    pub full_name: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Settings update. Absent fields are left alone; an empty string clears
/// an optional field.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: Option<String>,

    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    pub full_name: Option<String>,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(custom(function = "clearable_url"))]
    pub avatar_url: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.full_name.is_none()
            && self.bio.is_none()
            && self.avatar_url.is_none()
    }
}

fn clearable_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message("Invalid avatar URL".into()))
    }
}

// ============================================================================
// Post Requests
// ============================================================================

/// Check-in for an attended event
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    pub event_type: EventType,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: String,

    pub event_date: DateTime<Utc>,

    #[validate(length(min = 1, max = 200, message = "Venue must be 1-200 characters"))]
    pub venue: String,

    #[validate(length(max = 2000, message = "Content must be at most 2000 characters"))]
    pub content: Option<String>,
}

impl From<CreatePostRequest> for PostDraft {
    fn from(request: CreatePostRequest) -> Self {
        Self {
            title: request.title,
            event_type: request.event_type,
            image_url: request.image_url,
            event_date: request.event_date,
            venue: request.venue,
            content: request.content,
        }
    }
}

/// Like toggle. `is_liked` is the state the client currently shows.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct LikeToggleRequest {
    pub is_liked: bool,
}

// ============================================================================
// Comment Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"))]
    pub content: String,
}

// ============================================================================
// Follow Requests
// ============================================================================

/// Follow toggle. `is_following` is the state the client currently shows.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct FollowToggleRequest {
    pub is_following: bool,
}
