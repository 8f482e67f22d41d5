//! Comment service

use chirp_core::entities::{AuthorProfile, Comment};
use chirp_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CommentWithAuthor, CreateCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::invalidation::CacheInvalidator;
use super::resolvers::ProfileResolver;
use super::retry::with_read_retry;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a comment. Content is trimmed; blank content is rejected.
    #[instrument(skip(self, request))]
    pub async fn add_comment(
        &self,
        viewer_id: Snowflake,
        post_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let comment = Comment::new(self.ctx.generate_id(), post_id, viewer_id, &request.content)?;

        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, post_id = %post_id, user_id = %viewer_id, "Comment added");

        CacheInvalidator::new(self.ctx)
            .audience_feeds(post.post.user_id, Some(viewer_id))
            .await;

        let author = ProfileResolver::new(self.ctx)
            .resolve([viewer_id])
            .await?
            .remove(&viewer_id)
            .unwrap_or_else(|| AuthorProfile::unknown(viewer_id));

        Ok(CommentWithAuthor { comment, author }.into())
    }

    /// Comments on a post, oldest first
    #[instrument(skip(self))]
    pub async fn list_comments(&self, post_id: Snowflake) -> ServiceResult<Vec<CommentResponse>> {
        let config = self.ctx.query_config();

        let posts = self.ctx.post_repo();
        let exists = with_read_retry(config, "posts.exists", move || posts.exists(post_id)).await?;
        if !exists {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        let repo = self.ctx.comment_repo();
        let comments = with_read_retry(config, "comments.find_by_post", move || {
            repo.find_by_post(post_id)
        })
        .await?;

        let authors = ProfileResolver::new(self.ctx)
            .resolve(comments.iter().map(|comment| comment.user_id))
            .await?;

        Ok(comments
            .into_iter()
            .map(|comment| {
                let author = authors
                    .get(&comment.user_id)
                    .cloned()
                    .unwrap_or_else(|| AuthorProfile::unknown(comment.user_id));
                CommentWithAuthor { comment, author }.into()
            })
            .collect())
    }
}
