//! Notification through the log.

use async_trait::async_trait;
use shortscript_error::ShortscriptResult;
use shortscript_interface::{ArtifactRef, Notifier, notification_message};
use tracing::info;

/// Notifier that writes the message to the `tracing` log.
///
/// Stands in for chat or e-mail delivery when none is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, recipient: &str, artifact: &ArtifactRef) -> ShortscriptResult<()> {
        let message = notification_message(artifact);
        info!(recipient, artifact = %artifact, message = %message, "Notification");
        Ok(())
    }
}
