//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Comment, FollowEdge, FollowStats, PostLike, PostWithCounts, Profile, TicketPost};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Page of posts, newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostQuery {
    /// Only posts that sort after this one in `created_at DESC, id DESC` order
    pub before: Option<Snowflake>,
    pub limit: i64,
}

impl PostQuery {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 100;

    /// Build a query, clamping `limit` into `1..=MAX_LIMIT`
    pub fn new(limit: Option<i64>, before: Option<Snowflake>) -> Self {
        Self {
            before,
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, Self::MAX_LIMIT),
        }
    }

    /// First page with the given size; this is the only shape the feed cache stores
    #[inline]
    pub fn is_first_page(&self) -> bool {
        self.before.is_none()
    }
}

impl Default for PostQuery {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Login material stored next to a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: Snowflake,
    pub password_hash: String,
}

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Profile>>;

    /// Batch lookup; ids without a profile are simply absent from the result
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Profile>>;

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Profile>>;

    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create account and profile in one transaction
    async fn create(&self, profile: &Profile, email: &str, password_hash: &str) -> RepoResult<()>;

    async fn update(&self, profile: &Profile) -> RepoResult<()>;

    async fn find_credentials(&self, email: &str) -> RepoResult<Option<Credentials>>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PostWithCounts>>;

    /// Posts authored by any of `author_ids`, ordered `created_at DESC, id DESC`.
    /// The `before` cursor is a keyset on that same `(created_at, id)` pair; an
    /// unknown cursor id yields an empty page.
    async fn find_by_authors(
        &self,
        author_ids: &[Snowflake],
        query: PostQuery,
    ) -> RepoResult<Vec<PostWithCounts>>;

    async fn create(&self, post: &TicketPost) -> RepoResult<()>;

    async fn exists(&self, id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Like Repository
// ============================================================================

#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn exists(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Insert a like. Returns `false` if the pair already existed.
    async fn create(&self, like: &PostLike) -> RepoResult<bool>;

    /// Remove a like. Returns `false` if there was nothing to remove.
    async fn delete(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    async fn count_for_post(&self, post_id: Snowflake) -> RepoResult<i64>;

    /// Subset of `post_ids` the user has liked
    async fn liked_post_ids(
        &self,
        user_id: Snowflake,
        post_ids: &[Snowflake],
    ) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Comments on a post, oldest first
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>>;

    async fn count_for_post(&self, post_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn exists(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool>;

    /// Insert an edge. Returns `false` if it already existed.
    async fn create(&self, edge: &FollowEdge) -> RepoResult<bool>;

    /// Remove an edge. Returns `false` if there was nothing to remove.
    async fn delete(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool>;

    /// Ids the user follows
    async fn following_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>>;

    /// Ids following the user
    async fn follower_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>>;

    async fn stats(&self, user_id: Snowflake) -> RepoResult<FollowStats>;
}
