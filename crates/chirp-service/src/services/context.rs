//! Service context - dependency container for services
//!
//! Holds the repositories, the feed cache, and the auth helpers every
//! service borrows. Everything is behind a trait object so tests can swap
//! in in-memory fakes.

use std::sync::Arc;

use chirp_cache::{RedisFeedCache, SharedRedisPool};
use chirp_common::auth::{JwtService, PasswordService};
use chirp_common::{AppConfig, QueryConfig};
use chirp_core::traits::{
    CommentRepository, FeedCache, FollowRepository, LikeRepository, PostRepository,
    ProfileRepository,
};
use chirp_core::{Snowflake, SnowflakeGenerator};
use chirp_db::{
    PgCommentRepository, PgFollowRepository, PgLikeRepository, PgPool, PgPostRepository,
    PgProfileRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    profile_repo: Arc<dyn ProfileRepository>,
    post_repo: Arc<dyn PostRepository>,
    like_repo: Arc<dyn LikeRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    follow_repo: Arc<dyn FollowRepository>,

    // Request-result cache
    feed_cache: Arc<dyn FeedCache>,

    // Auth
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,

    snowflake_generator: Arc<SnowflakeGenerator>,
    query_config: QueryConfig,
}

impl ServiceContext {
    /// Wire the PostgreSQL repositories and the Redis feed cache
    pub fn from_infrastructure(pool: PgPool, redis_pool: SharedRedisPool, config: &AppConfig) -> Self {
        Self {
            profile_repo: Arc::new(PgProfileRepository::new(pool.clone())),
            post_repo: Arc::new(PgPostRepository::new(pool.clone())),
            like_repo: Arc::new(PgLikeRepository::new(pool.clone())),
            comment_repo: Arc::new(PgCommentRepository::new(pool.clone())),
            follow_repo: Arc::new(PgFollowRepository::new(pool)),
            feed_cache: Arc::new(RedisFeedCache::new(redis_pool, config.cache)),
            jwt_service: Arc::new(JwtService::from_config(&config.jwt, config.app.name.clone())),
            password_service: PasswordService::new(),
            snowflake_generator: Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)),
            query_config: config.query,
        }
    }

    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    // === Cache ===

    pub fn feed_cache(&self) -> &dyn FeedCache {
        self.feed_cache.as_ref()
    }

    // === Auth ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> PasswordService {
        self.password_service
    }

    // === Misc ===

    /// Retry policy for feed-layer reads
    pub fn query_config(&self) -> &QueryConfig {
        &self.query_config
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("feed_cache", &"dyn FeedCache")
            .field("query_config", &self.query_config)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom dependencies
#[derive(Default)]
pub struct ServiceContextBuilder {
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    like_repo: Option<Arc<dyn LikeRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    feed_cache: Option<Arc<dyn FeedCache>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    query_config: Option<QueryConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn like_repo(mut self, repo: Arc<dyn LikeRepository>) -> Self {
        self.like_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn feed_cache(mut self, cache: Arc<dyn FeedCache>) -> Self {
        self.feed_cache = Some(cache);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn query_config(mut self, config: QueryConfig) -> Self {
        self.query_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            profile_repo: self
                .profile_repo
                .ok_or_else(|| ServiceError::validation("profile_repo is required"))?,
            post_repo: self
                .post_repo
                .ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            like_repo: self
                .like_repo
                .ok_or_else(|| ServiceError::validation("like_repo is required"))?,
            comment_repo: self
                .comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            follow_repo: self
                .follow_repo
                .ok_or_else(|| ServiceError::validation("follow_repo is required"))?,
            feed_cache: self
                .feed_cache
                .ok_or_else(|| ServiceError::validation("feed_cache is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            password_service: PasswordService::new(),
            snowflake_generator: self.snowflake_generator.unwrap_or_default(),
            query_config: self.query_config.unwrap_or_default(),
        })
    }
}
