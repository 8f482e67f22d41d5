//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use chirp_core::entities::{PostWithCounts, TicketPost};
use chirp_core::error::DomainError;
use chirp_core::traits::{PostQuery, PostRepository, RepoResult};
use chirp_core::value_objects::Snowflake;

use crate::mappers::id_array;
use crate::models::PostWithCountsModel;

use super::error::{is_constraint_violation, map_db_error};

#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PostWithCounts>> {
        let result = sqlx::query_as::<_, PostWithCountsModel>(
            r"
            SELECT p.id, p.user_id, p.title, p.event_type, p.image_url, p.event_date,
                   p.venue, p.content, p.created_at, p.updated_at,
                   (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS likes_count,
                   (SELECT COUNT(*) FROM post_comments c WHERE c.post_id = p.id) AS comments_count
            FROM ticket_posts p
            WHERE p.id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PostWithCounts::from))
    }

    #[instrument(skip(self, author_ids), fields(authors = author_ids.len()))]
    async fn find_by_authors(
        &self,
        author_ids: &[Snowflake],
        query: PostQuery,
    ) -> RepoResult<Vec<PostWithCounts>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, PostWithCountsModel>(
            r"
            SELECT p.id, p.user_id, p.title, p.event_type, p.image_url, p.event_date,
                   p.venue, p.content, p.created_at, p.updated_at,
                   (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS likes_count,
                   (SELECT COUNT(*) FROM post_comments c WHERE c.post_id = p.id) AS comments_count
            FROM ticket_posts p
            WHERE p.user_id = ANY($1)
              AND ($2::BIGINT IS NULL OR (p.created_at, p.id) < (
                    SELECT a.created_at, a.id FROM ticket_posts a WHERE a.id = $2
                  ))
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $3
            ",
        )
        .bind(id_array(author_ids))
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PostWithCounts::from).collect())
    }

    #[instrument(skip(self), fields(post_id = %post.id, user_id = %post.user_id))]
    async fn create(&self, post: &TicketPost) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO ticket_posts
                (id, user_id, title, event_type, image_url, event_date, venue, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(post.id.into_inner())
        .bind(post.user_id.into_inner())
        .bind(&post.title)
        .bind(post.event_type.as_str())
        .bind(&post.image_url)
        .bind(post.event_date)
        .bind(&post.venue)
        .bind(&post.content)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_constraint_violation(&e) {
                DomainError::UserNotFound(post.user_id)
            } else {
                map_db_error(e)
            }
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(r"SELECT EXISTS(SELECT 1 FROM ticket_posts WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
