//! Post service
//!
//! Check-in creation and the single-author post listings.

use chirp_core::entities::{AuthorProfile, FeedPost, TicketPost};
use chirp_core::{DomainError, PostQuery, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreatePostRequest, PostResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::invalidation::CacheInvalidator;
use super::resolvers::{hydrate_posts, ProfileResolver};
use super::retry::with_read_retry;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a check-in for an attended event
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_post(
        &self,
        viewer_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let post = TicketPost::new(self.ctx.generate_id(), viewer_id, request.into());
        if post.title.is_empty() {
            return Err(ServiceError::validation("Title must not be blank"));
        }
        if post.venue.is_empty() {
            return Err(ServiceError::validation("Venue must not be blank"));
        }

        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, user_id = %viewer_id, event_type = %post.event_type, "Post created");

        CacheInvalidator::new(self.ctx)
            .audience_feeds(viewer_id, None)
            .await;

        let author = ProfileResolver::new(self.ctx)
            .resolve([viewer_id])
            .await?
            .remove(&viewer_id)
            .unwrap_or_else(|| AuthorProfile::unknown(viewer_id));

        Ok(FeedPost {
            post,
            author,
            likes_count: 0,
            comments_count: 0,
            liked_by_viewer: false,
        }
        .into())
    }

    /// Single post with author, counts and the viewer's like state
    #[instrument(skip(self))]
    pub async fn get_post(
        &self,
        viewer_id: Option<Snowflake>,
        post_id: Snowflake,
    ) -> ServiceResult<PostResponse> {
        let repo = self.ctx.post_repo();
        let post = with_read_retry(self.ctx.query_config(), "posts.find_by_id", move || {
            repo.find_by_id(post_id)
        })
        .await?
        .ok_or(DomainError::PostNotFound(post_id))?;

        hydrate_posts(self.ctx, viewer_id, vec![post])
            .await?
            .pop()
            .map(PostResponse::from)
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    /// Posts authored by one user, newest first
    #[instrument(skip(self))]
    pub async fn user_posts(
        &self,
        viewer_id: Option<Snowflake>,
        user_id: Snowflake,
        query: PostQuery,
    ) -> ServiceResult<Vec<PostResponse>> {
        if self.ctx.profile_repo().find_by_id(user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(user_id).into());
        }

        let repo = self.ctx.post_repo();
        let authors = [user_id];
        let author_ids = authors.as_slice();
        let page = with_read_retry(self.ctx.query_config(), "posts.find_by_authors", move || {
            repo.find_by_authors(author_ids, query)
        })
        .await?;

        let posts = hydrate_posts(self.ctx, viewer_id, page).await?;
        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    /// The viewer's own check-ins
    #[instrument(skip(self))]
    pub async fn my_tickets(&self, viewer_id: Snowflake, query: PostQuery) -> ServiceResult<Vec<PostResponse>> {
        self.user_posts(Some(viewer_id), viewer_id, query).await
    }
}
