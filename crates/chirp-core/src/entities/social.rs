//! Social graph entities - likes and follow edges

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// A like on a post, unique per (post, user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLike {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl PostLike {
    pub fn new(post_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            post_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// Directed follow edge: `follower_id` follows `following_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowEdge {
    pub follower_id: Snowflake,
    pub following_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl FollowEdge {
    /// # Errors
    /// `CannotFollowSelf` when both ends are the same user.
    pub fn new(follower_id: Snowflake, following_id: Snowflake) -> Result<Self, DomainError> {
        if follower_id == following_id {
            return Err(DomainError::CannotFollowSelf);
        }
        Ok(Self {
            follower_id,
            following_id,
            created_at: Utc::now(),
        })
    }
}

/// Follower and following counts for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FollowStats {
    pub followers: i64,
    pub following: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_edge_rejects_self() {
        let id = Snowflake::new(5);
        assert!(matches!(
            FollowEdge::new(id, id),
            Err(DomainError::CannotFollowSelf)
        ));
    }

    #[test]
    fn test_follow_edge_is_directed() {
        let edge = FollowEdge::new(Snowflake::new(1), Snowflake::new(2)).unwrap();
        assert_eq!(edge.follower_id, Snowflake::new(1));
        assert_eq!(edge.following_id, Snowflake::new(2));
    }
}
