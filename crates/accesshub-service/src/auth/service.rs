//! Login, token refresh, password reset, and authorization checks.
//!
//! Every failure inside the refresh and reset flows is folded into one
//! generic message per operation at this boundary — callers can never tell
//! an expired token from a revoked one or an unknown user.

use std::sync::Arc;

use tracing::{debug, info, warn};

use accesshub_auth::jwt::claims::{AccessGrant, Claims};
use accesshub_auth::jwt::encoder::TokenPair;
use accesshub_auth::password::PasswordHasher;
use accesshub_auth::tokens::TokenService;
use accesshub_core::error::AppError;
use accesshub_core::traits::ResetNotifier;
use accesshub_entity::permission::AccessAction;
use accesshub_entity::token::TokenKind;
use accesshub_entity::user::User;
use accesshub_store::traits::{RoleStore, UserStore};

use crate::user::UserService;

/// Login failure message. Unknown email and wrong password are deliberately
/// indistinguishable.
const INCORRECT_CREDENTIALS: &str = "Incorrect email or password";
/// Collapsed message for any refresh or access-verification failure.
const PLEASE_AUTHENTICATE: &str = "Please authenticate";
/// Collapsed message for any password-reset failure.
const RESET_FAILED: &str = "Password reset failed";

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Authenticated {
    /// The authenticated user.
    pub user: User,
    /// Generated token pair.
    pub tokens: TokenPair,
}

/// Orchestrates credential checks, token lifecycle, and authorization.
#[derive(Clone)]
pub struct AuthService {
    /// User persistence.
    users: Arc<dyn UserStore>,
    /// Role persistence, for resolving permission claims.
    roles: Arc<dyn RoleStore>,
    /// Token issuance and verification.
    tokens: Arc<TokenService>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Credential updates during reset.
    user_service: Arc<UserService>,
    /// Outbound reset delivery.
    notifier: Arc<dyn ResetNotifier>,
}

impl AuthService {
    /// Creates a new authentication engine.
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
        tokens: Arc<TokenService>,
        hasher: Arc<PasswordHasher>,
        user_service: Arc<UserService>,
        notifier: Arc<dyn ResetNotifier>,
    ) -> Self {
        Self {
            users,
            roles,
            tokens,
            hasher,
            user_service,
            notifier,
        }
    }

    /// Authenticates a user and issues an access + refresh pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<Authenticated, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized(INCORRECT_CREDENTIALS));
        };

        if !self
            .hasher
            .verify_password(password, &user.password_hash)?
        {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(INCORRECT_CREDENTIALS));
        }

        let grants = self.grants_for(&user).await?;
        let tokens = self.tokens.issue_auth_tokens(&user, grants).await?;

        info!(user_id = %user.id, "Login successful");

        Ok(Authenticated { user, tokens })
    }

    /// Exchanges a refresh token for a new access + refresh pair.
    ///
    /// The presented token and any stale refresh siblings are revoked
    /// before the new pair is issued. A concurrent call racing on the same
    /// token loses the atomic claim and fails closed.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        self.refresh_inner(refresh_token)
            .await
            .map_err(|e| collapse(e, PLEASE_AUTHENTICATE))
    }

    async fn refresh_inner(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let verified = self.tokens.verify(refresh_token, TokenKind::Refresh).await?;
        let record = verified
            .record
            .ok_or_else(|| AppError::internal("Refresh token missing persisted record"))?;

        let user = self
            .users
            .find_by_id(verified.claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        // Single-use: exactly one concurrent caller wins this claim.
        let record = self.tokens.claim(&record).await?;
        self.tokens
            .revoke_all(record.user_id, TokenKind::Refresh)
            .await?;

        let grants = self.grants_for(&user).await?;
        let pair = self.tokens.issue_auth_tokens(&user, grants).await?;

        info!(user_id = %user.id, "Token pair refreshed");

        Ok(pair)
    }

    /// Starts the password-reset flow for an email address.
    ///
    /// Unknown addresses succeed silently so callers cannot probe which
    /// emails are registered. Delivery failures are logged and swallowed;
    /// the core never retries.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = self.tokens.issue_reset_token(&user).await?;

        if let Err(e) = self
            .notifier
            .send_reset_password_email(&user.email, &token)
            .await
        {
            warn!(user_id = %user.id, error = %e, "Reset email delivery failed");
        }

        info!(user_id = %user.id, "Password reset requested");

        Ok(())
    }

    /// Completes a password reset with a previously issued reset token.
    ///
    /// Consuming one token invalidates every outstanding reset token for
    /// that user.
    pub async fn complete_password_reset(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        self.reset_inner(reset_token, new_password)
            .await
            .map_err(|e| collapse(e, RESET_FAILED))
    }

    async fn reset_inner(&self, reset_token: &str, new_password: &str) -> Result<(), AppError> {
        let verified = self
            .tokens
            .verify(reset_token, TokenKind::ResetPassword)
            .await?;
        let record = verified
            .record
            .ok_or_else(|| AppError::internal("Reset token missing persisted record"))?;

        let user = self
            .users
            .find_by_id(verified.claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        let record = self.tokens.claim(&record).await?;
        self.tokens
            .revoke_all(record.user_id, TokenKind::ResetPassword)
            .await?;

        self.user_service
            .update_password(user.id, new_password)
            .await?;

        info!(user_id = %user.id, "Password reset completed");

        Ok(())
    }

    /// Validates an access token and checks one permission flag.
    ///
    /// Returns the decoded claims so callers can reuse the identity.
    pub async fn authorize(
        &self,
        access_token: &str,
        key: &str,
        action: AccessAction,
    ) -> Result<Claims, AppError> {
        let verified = self
            .tokens
            .verify(access_token, TokenKind::Access)
            .await
            .map_err(|e| collapse(e, PLEASE_AUTHENTICATE))?;

        if !verified.claims.allows(key, action) {
            return Err(AppError::forbidden(format!(
                "Missing '{action}' permission for '{key}'"
            )));
        }

        Ok(verified.claims)
    }

    /// Resolves the permission claims for a user's active roles.
    ///
    /// Inactive roles, dangling role references, and inactive snapshots are
    /// skipped; flags are unioned per key.
    pub async fn grants_for(&self, user: &User) -> Result<Vec<AccessGrant>, AppError> {
        let mut grants: Vec<AccessGrant> = Vec::new();

        for role_id in &user.roles {
            let Some(role) = self.roles.find_by_id(*role_id).await? else {
                continue;
            };
            if !role.is_active {
                continue;
            }
            for snapshot in &role.permissions {
                if !snapshot.is_active {
                    continue;
                }
                match grants.iter_mut().find(|grant| grant.key == snapshot.key) {
                    Some(existing) => existing.union(snapshot),
                    None => grants.push(AccessGrant::from(snapshot)),
                }
            }
        }

        Ok(grants)
    }
}

/// Folds an internal failure into the operation's single outward message.
///
/// The original cause is logged, then discarded; the caller only ever sees
/// the generic authentication error.
fn collapse(err: AppError, message: &'static str) -> AppError {
    warn!(error = %err, "Authentication flow failed");
    AppError::unauthorized(message)
}
