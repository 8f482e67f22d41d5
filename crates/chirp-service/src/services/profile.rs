//! Profile service
//!
//! Profile reads, the settings page update, and the public profile page.

use chirp_core::entities::Profile;
use chirp_core::{DomainError, Snowflake};
use tracing::{debug, info, instrument};

use crate::dto::{ProfilePageResponse, ProfileResponse, UpdateProfileRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::follow::FollowService;
use super::invalidation::CacheInvalidator;
use super::retry::with_read_retry;

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Snowflake) -> ServiceResult<ProfileResponse> {
        Ok(self.load(user_id).await?.into())
    }

    /// Profile of the authenticated user
    #[instrument(skip(self))]
    pub async fn current_profile(&self, viewer_id: Snowflake) -> ServiceResult<ProfileResponse> {
        self.get_profile(viewer_id).await
    }

    /// Apply a settings change. Absent fields are kept, empty strings clear
    /// optional fields, and `updated_at` is bumped.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        viewer_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        let mut profile = self.load(viewer_id).await?;
        if request.is_empty() {
            debug!(user_id = %viewer_id, "Empty profile update, nothing to write");
            return Ok(profile.into());
        }

        if let Some(raw) = request.username.as_deref() {
            let username = Profile::normalize_username(raw)?;
            if !username.eq_ignore_ascii_case(&profile.username)
                && self.ctx.profile_repo().username_exists(&username).await?
            {
                return Err(DomainError::UsernameTaken.into());
            }
            profile.username = username;
        }
        if let Some(full_name) = request.full_name {
            profile.full_name = clearable(full_name);
        }
        if let Some(bio) = request.bio {
            profile.bio = clearable(bio);
        }
        if let Some(avatar_url) = request.avatar_url {
            profile.avatar_url = clearable(avatar_url);
        }

        profile.touch();
        self.ctx.profile_repo().update(&profile).await?;

        info!(user_id = %viewer_id, "Profile updated");

        // Author blocks in cached feeds carry the old name and avatar
        CacheInvalidator::new(self.ctx)
            .audience_feeds(viewer_id, None)
            .await;

        Ok(profile.into())
    }

    /// Profile, follow counts, and whether the viewer follows this user
    #[instrument(skip(self))]
    pub async fn user_profile_page(
        &self,
        viewer_id: Option<Snowflake>,
        user_id: Snowflake,
    ) -> ServiceResult<ProfilePageResponse> {
        let profile = self.load(user_id).await?;
        let follows = FollowService::new(self.ctx);

        let stats = follows.follow_stats(user_id).await?;
        let is_following = match viewer_id {
            Some(viewer_id) if viewer_id != user_id => {
                follows.is_following(viewer_id, user_id).await?
            }
            _ => false,
        };

        Ok(ProfilePageResponse {
            profile: profile.into(),
            stats,
            is_following,
        })
    }

    async fn load(&self, user_id: Snowflake) -> ServiceResult<Profile> {
        let repo = self.ctx.profile_repo();
        with_read_retry(self.ctx.query_config(), "profiles.find_by_id", move || {
            repo.find_by_id(user_id)
        })
        .await?
        .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }
}

/// Trimmed value, or `None` for a blank one
fn clearable(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearable() {
        assert_eq!(clearable(String::new()), None);
        assert_eq!(clearable("   ".to_string()), None);
        assert_eq!(clearable(" Alex ".to_string()).as_deref(), Some("Alex"));
    }
}
