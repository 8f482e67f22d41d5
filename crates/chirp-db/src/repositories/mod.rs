//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in chirp-core.

mod comment;
mod error;
mod follow;
mod like;
mod post;
mod profile;

pub use comment::PgCommentRepository;
pub use follow::PgFollowRepository;
pub use like::PgLikeRepository;
pub use post::PgPostRepository;
pub use profile::PgProfileRepository;
