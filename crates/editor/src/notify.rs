//! Toast notifications.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification failed: {0}")]
    Failed(String),
}

/// User-facing notification channel (toasts).
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn show_success_toast(&self, title: &str, message: &str) -> Result<(), NotifyError>;

    async fn show_error_toast(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}

/// Notifier that writes toasts to the log. Used by headless front-ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

#[async_trait::async_trait]
impl Notifier for TracingNotifier {
    async fn show_success_toast(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        tracing::info!(toast = "success", "{title}: {message}");
        Ok(())
    }

    async fn show_error_toast(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        tracing::error!(toast = "error", "{title}: {message}");
        Ok(())
    }
}

// Notification failures never change the outcome of the operation that
// triggered them.

pub(crate) async fn success<N: Notifier + ?Sized>(notifier: &N, title: &str, message: &str) {
    if let Err(e) = notifier.show_success_toast(title, message).await {
        tracing::warn!("failed to show success toast: {e}");
    }
}

pub(crate) async fn error<N: Notifier + ?Sized>(notifier: &N, title: &str, message: &str) {
    if let Err(e) = notifier.show_error_toast(title, message).await {
        tracing::warn!("failed to show error toast: {e}");
    }
}
