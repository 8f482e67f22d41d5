//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod post;
mod profile;

pub use comment::CommentModel;
pub use post::PostWithCountsModel;
pub use profile::{CredentialsModel, ProfileModel};
