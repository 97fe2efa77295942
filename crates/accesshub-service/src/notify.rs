//! Default reset notifier.

use async_trait::async_trait;

use accesshub_core::result::AppResult;
use accesshub_core::traits::ResetNotifier;
use tracing::info;

/// Notifier that writes reset tokens to the log instead of delivering them.
///
/// Stands in wherever no real mail transport is wired up (development,
/// tests, single-node evaluation installs).
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    /// Creates a new log notifier.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResetNotifier for LogNotifier {
    async fn send_reset_password_email(&self, email: &str, token: &str) -> AppResult<()> {
        info!(email, token, "Password reset token issued");
        Ok(())
    }
}
