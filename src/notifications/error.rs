//! Transport error types for endpoint delivery

use crate::core::error_handling::ContextualError;

/// Failure signalled by the channel when an endpoint invocation does not
/// complete
///
/// The proxy treats every variant uniformly as grounds for retry: it has
/// no way to distinguish a broken channel from an endpoint that rejected
/// the call at the application level, and only transport failures are
/// worth retrying, so both are modelled as transport failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Endpoint is not reachable")]
    Disconnected,

    #[error("Remote call rejected (code {code}): {message}")]
    Rejected { code: i32, message: String },

    #[error("Endpoint handle is stale and must be re-attached")]
    Stale,
}

impl ContextualError for TransportError {
    fn is_user_actionable(&self) -> bool {
        false // Transport failures are system-level and retried internally
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

/// Result type for endpoint invocations
pub type TransportResult<T> = Result<T, TransportError>;
