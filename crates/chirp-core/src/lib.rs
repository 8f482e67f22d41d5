//! # chirp-core
//!
//! Domain layer for TicketChirp: profiles, check-in posts, likes, comments and
//! follow edges, plus the repository and cache ports the outer layers implement.
//! The feed assembly rules live in [`feed`] as pure functions so they can be
//! exercised without any infrastructure.

pub mod entities;
pub mod error;
pub mod feed;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AuthorProfile, Comment, EventType, FeedPost, FollowEdge, FollowStats, PostDraft, PostLike,
    PostWithCounts, Profile, TicketPost,
};
pub use error::DomainError;
pub use traits::{
    CacheGeneration, CommentRepository, Credentials, FeedCache, FollowRepository, LikeRepository,
    PostQuery, PostRepository, ProfileRepository, RepoResult,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
