//! Profile and account database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `profiles` table
#[derive(Debug, Clone, FromRow)]
pub struct ProfileModel {
    pub id: i64,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Login lookup from the `accounts` table
#[derive(Debug, Clone, FromRow)]
pub struct CredentialsModel {
    pub id: i64,
    pub password_hash: String,
}
