//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] for the duration of one
//! request and orchestrates repositories, the feed cache and auth helpers.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod feed;
pub mod follow;
mod invalidation;
pub mod like;
pub mod post;
pub mod profile;
pub mod resolvers;
pub mod retry;


pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use feed::FeedService;
pub use follow::FollowService;
pub use like::LikeService;
pub use post::PostService;
pub use profile::ProfileService;
pub use resolvers::{LikeStateResolver, ProfileResolver};
pub use retry::with_read_retry;
