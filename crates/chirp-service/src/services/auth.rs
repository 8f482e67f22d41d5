//! Authentication service
//!
//! Handles registration, login and token refresh. Refresh tokens are
//! stateless JWTs; rotation issues a new pair without a server-side store.

use chirp_common::auth::TokenPair;
use chirp_common::AppError;
use chirp_core::entities::Profile;
use chirp_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, ProfileResponse, RefreshTokenRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account and its profile
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let username = Profile::normalize_username(&request.username)?;
        let email = normalize_email(&request.email);

        if self.ctx.profile_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.profile_repo().username_exists(&username).await? {
            return Err(DomainError::UsernameTaken.into());
        }

        // Strength check happens before hashing
        let password_hash = self.ctx.password_service().hash_new(&request.password)?;

        let mut profile = Profile::new(self.ctx.generate_id(), username);
        profile.full_name = request
            .full_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        self.ctx
            .profile_repo()
            .create(&profile, &email, &password_hash)
            .await?;

        info!(user_id = %profile.id, "User registered successfully");

        let tokens = self.ctx.jwt_service().generate_token_pair(profile.id)?;
        Ok(auth_response(tokens, &profile))
    }

    /// Login with email and password
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = normalize_email(&request.email);

        let credentials = self
            .ctx
            .profile_repo()
            .find_credentials(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &credentials.password_hash)
            .inspect_err(|_| warn!(user_id = %credentials.user_id, "Login failed: invalid password"))?;

        let profile = self.load_profile(credentials.user_id).await?;

        info!(user_id = %profile.id, "User logged in successfully");

        let tokens = self.ctx.jwt_service().generate_token_pair(profile.id)?;
        Ok(auth_response(tokens, &profile))
    }

    /// Exchange a refresh token for a new pair
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let (user_id, tokens) = self
            .ctx
            .jwt_service()
            .refresh_tokens(&request.refresh_token)?;

        // A token for a profile that no longer exists is just invalid
        let profile = self
            .ctx
            .profile_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        info!(user_id = %user_id, "Tokens refreshed successfully");

        Ok(auth_response(tokens, &profile))
    }

    /// Validate an access token and return the user ID
    pub fn validate_token(&self, token: &str) -> ServiceResult<Snowflake> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        Ok(claims.user_id()?)
    }

    async fn load_profile(&self, user_id: Snowflake) -> ServiceResult<Profile> {
        self.ctx
            .profile_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn auth_response(tokens: TokenPair, profile: &Profile) -> AuthResponse {
    AuthResponse::new(
        tokens.access_token,
        tokens.refresh_token,
        tokens.expires_in,
        ProfileResponse::from(profile),
    )
}
