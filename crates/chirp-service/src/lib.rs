//! # chirp-service
//!
//! Application layer for TicketChirp: feed aggregation, like and follow
//! toggles, comments, profiles and authentication, plus the request and
//! response DTOs the HTTP layer speaks.
//!
//! ```rust,ignore
//! use chirp_service::{FeedService, ServiceContext};
//!
//! let ctx = ServiceContext::from_infrastructure(pool, redis_pool, &config);
//! let feed = FeedService::new(&ctx).feed(Some(viewer_id), PostQuery::default()).await?;
//! ```

pub mod dto;
pub mod services;

pub use dto::{
    AuthResponse, CommentResponse, CreateCommentRequest, CreatePostRequest,
    FollowStatsResponse, FollowToggleRequest, FollowToggleResponse, HealthResponse,
    LikeToggleRequest, LikeToggleResponse, LoginRequest, PostResponse, ProfilePageResponse,
    ProfileResponse, ReadinessResponse, RefreshTokenRequest, RegisterRequest,
    UpdateProfileRequest, UserSummaryResponse,
};
pub use services::{
    AuthService, CommentService, FeedService, FollowService, LikeService, PostService,
    ProfileService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
