//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use chirp_core::entities::{FollowEdge, FollowStats};
use chirp_core::error::DomainError;
use chirp_core::traits::{FollowRepository, RepoResult};
use chirp_core::value_objects::Snowflake;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ids(&self, sql: &'static str, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let ids = sqlx::query_scalar::<_, i64>(sql)
            .bind(user_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self))]
    async fn exists(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)
            ",
        )
        .bind(follower_id.into_inner())
        .bind(following_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self), fields(follower_id = %edge.follower_id, following_id = %edge.following_id))]
    async fn create(&self, edge: &FollowEdge) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO follows (follower_id, following_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (follower_id, following_id) DO NOTHING
            ",
        )
        .bind(edge.follower_id.into_inner())
        .bind(edge.following_id.into_inner())
        .bind(edge.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let (self_loop, dangling) = e.as_database_error().map_or((false, false), |db| {
                (db.is_check_violation(), db.is_foreign_key_violation())
            });
            if self_loop {
                DomainError::CannotFollowSelf
            } else if dangling {
                DomainError::UserNotFound(edge.following_id)
            } else {
                map_db_error(e)
            }
        })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool> {
        let result =
            sqlx::query(r"DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
                .bind(follower_id.into_inner())
                .bind(following_id.into_inner())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn following_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        self.ids(
            r"SELECT following_id FROM follows WHERE follower_id = $1 ORDER BY created_at DESC",
            user_id,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn follower_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        self.ids(
            r"SELECT follower_id FROM follows WHERE following_id = $1 ORDER BY created_at DESC",
            user_id,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn stats(&self, user_id: Snowflake) -> RepoResult<FollowStats> {
        let (followers, following) = sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT
                (SELECT COUNT(*) FROM follows WHERE following_id = $1) AS followers,
                (SELECT COUNT(*) FROM follows WHERE follower_id = $1) AS following
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(FollowStats {
            followers,
            following,
        })
    }
}
