//! Notification sink abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// Outbound plain-text message push.
///
/// Implementations report delivery failures as errors; `NotificationService`
/// logs them and never passes them on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &str) -> CoreResult<()>;
}

/// Sink that drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, message: &str) -> CoreResult<()> {
        log::debug!("[notify] dropped: {message}");
        Ok(())
    }
}
