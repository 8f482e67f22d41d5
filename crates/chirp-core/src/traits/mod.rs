//! Ports implemented by the infrastructure crates

mod cache;
mod repositories;

pub use cache::{CacheGeneration, FeedCache};
pub use repositories::{
    CommentRepository, Credentials, FollowRepository, LikeRepository, PostQuery, PostRepository,
    ProfileRepository, RepoResult,
};
