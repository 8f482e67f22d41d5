//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions for rows read back from PostgreSQL.
//! Writes bind entity fields directly, so there is no reverse direction.

use chirp_core::entities::{Comment, EventType, PostWithCounts, Profile, TicketPost};
use chirp_core::traits::Credentials;
use chirp_core::value_objects::Snowflake;

use crate::models::{CommentModel, CredentialsModel, PostWithCountsModel, ProfileModel};

impl From<ProfileModel> for Profile {
    fn from(model: ProfileModel) -> Self {
        Profile {
            id: Snowflake::new(model.id),
            username: model.username,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
            bio: model.bio,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CredentialsModel> for Credentials {
    fn from(model: CredentialsModel) -> Self {
        Credentials {
            user_id: Snowflake::new(model.id),
            password_hash: model.password_hash,
        }
    }
}

impl From<PostWithCountsModel> for PostWithCounts {
    fn from(model: PostWithCountsModel) -> Self {
        // the CHECK constraint keeps this total; unknown values fall back to Other
        let event_type = model.event_type.parse().unwrap_or(EventType::Other);

        PostWithCounts {
            post: TicketPost {
                id: Snowflake::new(model.id),
                user_id: Snowflake::new(model.user_id),
                title: model.title,
                event_type,
                image_url: model.image_url,
                event_date: model.event_date,
                venue: model.venue,
                content: model.content,
                created_at: model.created_at,
                updated_at: model.updated_at,
            },
            likes_count: model.likes_count,
            comments_count: model.comments_count,
        }
    }
}

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Raw ids for `= ANY($1)` binds
pub fn id_array(ids: &[Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}
