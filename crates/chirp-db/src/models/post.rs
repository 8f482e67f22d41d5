//! Ticket post database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of `ticket_posts` joined with its like and comment counts
#[derive(Debug, Clone, FromRow)]
pub struct PostWithCountsModel {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub event_type: String,
    pub image_url: String,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes_count: i64,
    pub comments_count: i64,
}
