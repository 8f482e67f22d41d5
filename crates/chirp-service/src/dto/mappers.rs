//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chirp_core::entities::{AuthorProfile, Comment, FeedPost, FollowStats, Profile};

use super::responses::{
    CommentResponse, FollowStatsResponse, PostResponse, ProfileResponse, ProfileSummary,
    UserSummaryResponse,
};

// ============================================================================
// Profile Mappers
// ============================================================================

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username.clone(),
            full_name: profile.full_name.clone(),
            avatar_url: profile.avatar_url.clone(),
            bio: profile.bio.clone(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self::from(&profile)
    }
}

impl From<AuthorProfile> for ProfileSummary {
    fn from(author: AuthorProfile) -> Self {
        Self {
            username: author.username,
            full_name: author.full_name,
            avatar_url: author.avatar_url,
        }
    }
}

impl From<AuthorProfile> for UserSummaryResponse {
    fn from(author: AuthorProfile) -> Self {
        Self {
            id: author.id.to_string(),
            username: author.username,
            full_name: author.full_name,
            avatar_url: author.avatar_url,
        }
    }
}

impl From<FollowStats> for FollowStatsResponse {
    fn from(stats: FollowStats) -> Self {
        Self {
            followers: stats.followers,
            following: stats.following,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl From<FeedPost> for PostResponse {
    fn from(item: FeedPost) -> Self {
        let post = item.post;
        Self {
            id: post.id.to_string(),
            user_id: post.user_id.to_string(),
            title: post.title,
            event_type: post.event_type,
            image_url: post.image_url,
            event_date: post.event_date,
            venue: post.venue,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
            profile: item.author.into(),
            likes_count: item.likes_count,
            comments_count: item.comments_count,
            user_has_liked: item.liked_by_viewer,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

/// Comment joined with its resolved author
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: AuthorProfile,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(data: CommentWithAuthor) -> Self {
        let comment = data.comment;
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            user_id: comment.user_id.to_string(),
            content: comment.content,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            profile: data.author.into(),
        }
    }
}
