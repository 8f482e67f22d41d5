//! Domain entities - core business objects

mod comment;
mod post;
mod profile;
mod social;

pub use comment::Comment;
pub use post::{EventType, FeedPost, PostDraft, PostWithCounts, TicketPost, UnknownEventType};
pub use profile::{AuthorProfile, Profile};
pub use social::{FollowEdge, FollowStats, PostLike};
