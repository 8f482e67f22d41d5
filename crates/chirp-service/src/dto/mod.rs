//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCommentRequest, CreatePostRequest, FollowToggleRequest, LikeToggleRequest, LoginRequest,
    RefreshTokenRequest, RegisterRequest, UpdateProfileRequest,
};

pub use responses::{
    AuthResponse, CommentResponse, FollowStatsResponse, FollowToggleResponse,
    HealthChecks, HealthResponse, LikeToggleResponse, PostResponse, ProfilePageResponse,
    ProfileResponse, ProfileSummary, ReadinessResponse, UserSummaryResponse,
};

pub use mappers::CommentWithAuthor;
