//! Comment entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Comment on a ticket post. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub const MAX_LENGTH: usize = 1000;

    /// Build a comment from raw input, trimming whitespace.
    ///
    /// # Errors
    /// `EmptyContent` when nothing is left after trimming, `ContentTooLong`
    /// above [`Self::MAX_LENGTH`] characters.
    pub fn new(
        id: Snowflake,
        post_id: Snowflake,
        user_id: Snowflake,
        content: &str,
    ) -> Result<Self, DomainError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::EmptyContent);
        }
        if content.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let now = Utc::now();
        Ok(Self {
            id,
            post_id,
            user_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}
