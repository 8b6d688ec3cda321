//! Adapters implementing the core traits on top of the network toolbox and `SQLite`.

mod dns_resolver;
mod http_source;
mod slack_notifier;

pub use dns_resolver::HickoryDnsResolver;
pub use http_source::{HttpCategorySource, HttpSignalSource};
pub use slack_notifier::SlackNotifier;

#[cfg(feature = "sqlite-store")]
mod sqlite;

#[cfg(feature = "sqlite-store")]
pub use sqlite::SqliteStore;

use shepherd_core::error::CoreError;
use shepherd_toolbox::ToolboxError;

/// Map a toolbox failure into the core error space.
pub(crate) fn toolbox_error(context: &str, error: ToolboxError) -> CoreError {
    match error {
        ToolboxError::ValidationError(msg) => CoreError::ValidationError(format!("{context}: {msg}")),
        ToolboxError::Timeout(secs) => CoreError::Timeout(format!("{context} after {secs}s")),
        ToolboxError::NetworkError(msg) => CoreError::NetworkError(format!("{context}: {msg}")),
        ToolboxError::HttpStatus { status, body } => {
            CoreError::NetworkError(format!("{context}: HTTP {status}: {body}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_stay_timeouts() {
        let err = toolbox_error("talos lookup", ToolboxError::Timeout(15));
        assert!(matches!(err, CoreError::Timeout(ref msg) if msg == "talos lookup after 15s"));
    }

    #[test]
    fn http_status_becomes_network_error() {
        let err = toolbox_error(
            "webhook",
            ToolboxError::HttpStatus {
                status: 404,
                body: "no_team".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Network error: webhook: HTTP 404: no_team");
    }
}
