//! Profile entity - public identity of a TicketChirp user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// User profile, one per account (same id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Snowflake,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub const USERNAME_MIN: usize = 2;
    pub const USERNAME_MAX: usize = 32;
    pub const FULL_NAME_MAX: usize = 100;
    pub const BIO_MAX: usize = 500;

    pub fn new(id: Snowflake, username: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            full_name: None,
            avatar_url: None,
            bio: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name to show in the UI: full name when set, otherwise the username
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// Bump `updated_at` after a settings change
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Trim and check a requested username: 2-32 characters of letters,
    /// digits, `_` or `.`
    ///
    /// # Errors
    /// `InvalidUsername` describing the first broken rule
    pub fn normalize_username(raw: &str) -> Result<String, DomainError> {
        let username = raw.trim();
        let len = username.chars().count();
        if !(Self::USERNAME_MIN..=Self::USERNAME_MAX).contains(&len) {
            return Err(DomainError::InvalidUsername(format!(
                "must be {}-{} characters",
                Self::USERNAME_MIN,
                Self::USERNAME_MAX
            )));
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            return Err(DomainError::InvalidUsername(
                "only letters, digits, '_' and '.' are allowed".to_string(),
            ));
        }
        Ok(username.to_string())
    }
}

/// Author metadata attached to posts and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub id: Snowflake,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl AuthorProfile {
    pub const UNKNOWN_USER: &'static str = "Unknown User";
    pub const UNKNOWN: &'static str = "Unknown";

    /// Placeholder for an author id whose profile could not be resolved
    pub fn unknown(id: Snowflake) -> Self {
        Self {
            id,
            username: Self::UNKNOWN_USER.to_string(),
            full_name: None,
            avatar_url: None,
        }
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.username == Self::UNKNOWN_USER && self.full_name.is_none()
    }
}

impl From<&Profile> for AuthorProfile {
    fn from(profile: &Profile) -> Self {
        let username = if profile.username.trim().is_empty() {
            Self::UNKNOWN.to_string()
        } else {
            profile.username.clone()
        };

        Self {
            id: profile.id,
            username,
            full_name: profile.full_name.clone(),
            avatar_url: profile.avatar_url.clone(),
        }
    }
}

impl From<Profile> for AuthorProfile {
    fn from(profile: Profile) -> Self {
        Self::from(&profile)
    }
}
