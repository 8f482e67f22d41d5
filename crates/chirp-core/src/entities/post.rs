//! Ticket post entity - a check-in for an attended event

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AuthorProfile;
use crate::value_objects::Snowflake;

/// Kind of event a ticket was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Movie,
    Concert,
    Musical,
    Theater,
    #[default]
    Other,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        Self::Movie,
        Self::Concert,
        Self::Musical,
        Self::Theater,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Concert => "concert",
            Self::Musical => "musical",
            Self::Theater => "theater",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized event type string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type: {0}")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "concert" => Ok(Self::Concert),
            "musical" => Ok(Self::Musical),
            "theater" | "theatre" => Ok(Self::Theater),
            "other" => Ok(Self::Other),
            other => Err(UnknownEventType(other.to_string())),
        }
    }
}

/// Fields supplied by the check-in flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub event_type: EventType,
    pub image_url: String,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub content: Option<String>,
}

/// Ticket post. Never edited or deleted once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPost {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub title: String,
    pub event_type: EventType,
    pub image_url: String,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TicketPost {
    pub const TITLE_MAX: usize = 200;
    pub const VENUE_MAX: usize = 200;
    pub const CONTENT_MAX: usize = 2000;

    pub fn new(id: Snowflake, user_id: Snowflake, draft: PostDraft) -> Self {
        let now = Utc::now();
        let content = draft
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Self {
            id,
            user_id,
            title: draft.title.trim().to_string(),
            event_type: draft.event_type,
            image_url: draft.image_url,
            event_date: draft.event_date,
            venue: draft.venue.trim().to_string(),
            content,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }
}

/// Post plus its derived row counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithCounts {
    pub post: TicketPost,
    pub likes_count: i64,
    pub comments_count: i64,
}

impl PostWithCounts {
    /// A post that was just written has no likes or comments yet
    pub fn fresh(post: TicketPost) -> Self {
        Self {
            post,
            likes_count: 0,
            comments_count: 0,
        }
    }
}

/// Feed item: post joined with its author and the viewer's like state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPost {
    pub post: TicketPost,
    pub author: AuthorProfile,
    pub likes_count: i64,
    pub comments_count: i64,
    pub liked_by_viewer: bool,
}
