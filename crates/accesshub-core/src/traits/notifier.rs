//! Outbound notification capability.

use async_trait::async_trait;

use crate::result::AppResult;

/// Delivers password-reset messages to users.
///
/// Implemented by the surrounding application (SMTP, queue, etc.). The core
/// treats delivery as fire-and-forget: a failed send is logged by the caller
/// and never retried.
#[async_trait]
pub trait ResetNotifier: Send + Sync + 'static {
    /// Send a password-reset token to the given address.
    async fn send_reset_password_email(&self, email: &str, token: &str) -> AppResult<()>;
}
