//! Traits for consumer endpoints

use crate::notifications::error::TransportResult;

/// Opaque identity token for a consumer endpoint
///
/// Callers that need to decide whether two endpoint handles refer to the
/// same underlying channel peer compare these tokens; the value itself
/// carries no other meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawHandle(pub u64);

/// The current receiver of notification events
///
/// Implementations wrap one side of an unreliable cross-process channel.
/// Each operation either completes (`Ok`) or signals a transport-level
/// failure; any other outcome is outside this contract. Invocations must
/// be bounded: a call that could block indefinitely needs its own timeout,
/// because the delivery proxy invokes these operations while holding its
/// internal lock.
pub trait ConsumerEndpoint: Send + Sync {
    /// An HTTP download completed; `payload` is the downloaded body
    fn download_succeeded(&self, request_id: u32, payload: &[u8]) -> TransportResult<()>;

    /// An HTTP download-to-file completed
    fn download_to_file_succeeded(&self, request_id: u32) -> TransportResult<()>;

    /// An HTTP download failed
    fn download_failed(&self, request_id: u32, code: i32, message: &str) -> TransportResult<()>;

    /// Progress report for an in-flight download
    fn download_progress(
        &self,
        request_id: u32,
        have_bytes: u64,
        total_bytes: u64,
    ) -> TransportResult<()>;

    /// The service heartbeat round-trip completed
    fn heartbeat_succeeded(&self, request_id: u32) -> TransportResult<()>;

    /// Credentials were verified against the remote service
    fn auth_check_succeeded(&self, request_id: u32) -> TransportResult<()>;

    /// Login to the remote service failed
    fn remote_login_failed(&self, request_id: u32, code: i32, message: &str)
        -> TransportResult<()>;

    /// The subscribed podcast list was fetched; `podcasts` preserves the
    /// remote ordering
    fn podcast_list_download_succeeded(
        &self,
        request_id: u32,
        podcasts: &[String],
    ) -> TransportResult<()>;

    /// Fetching the subscribed podcast list failed
    fn podcast_list_download_failed(
        &self,
        request_id: u32,
        code: i32,
        message: &str,
    ) -> TransportResult<()>;

    /// Identity token for liveness checks and endpoint comparison
    ///
    /// Returns `None` when the underlying channel peer is known to be
    /// gone; two endpoints refer to the same peer exactly when both return
    /// `Some` of equal tokens.
    fn raw_handle(&self) -> Option<RawHandle>;
}
