//! DeliveryProxy - the acceptance surface producers talk to
//!
//! Implements one acceptance operation per catalogue entry, all with the
//! same shape: wrap the payload as a [`NotificationEvent`], enqueue it on
//! the pending queue, then drain against the current endpoint unless the
//! proxy is passive or detached.

use std::sync::{Arc, Mutex};

use crate::core::sync::lock_recover;
use crate::notifications::event::NotificationEvent;
use crate::notifications::traits::{ConsumerEndpoint, RawHandle};
use crate::relay::queue::PendingQueue;

/// Shared mutable state: backlog, current endpoint, mode flag
///
/// All three are mutated only under the proxy's mutex; enqueue, drain,
/// target replacement and the mode toggle are each one atomic critical
/// section per operation.
struct ProxyState {
    backlog: PendingQueue,
    target: Option<Arc<dyn ConsumerEndpoint>>,
    passive: bool,
}

/// Store-and-forward delivery proxy for notification events
///
/// Accepts events from any number of concurrent producers and guarantees
/// each one is retained until successfully handed to the current consumer
/// endpoint. Acceptance is unconditional: producers get no synchronous
/// indication of delivery, which is observable only via
/// [`count_waiting`](DeliveryProxy::count_waiting) or the endpoint's own
/// side effects.
///
/// One proxy is constructed per logical session and handed explicitly to
/// producers and to whatever code manages endpoint attachment; there is no
/// ambient global instance.
///
/// # Thread Safety
///
/// Fully thread-safe; share it as `Arc<DeliveryProxy>`. Endpoint delivery
/// happens while the internal lock is held, so endpoint implementations
/// must be bounded or quickly-failing (see [`ConsumerEndpoint`]).
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use podrelay::relay::api::DeliveryProxy;
///
/// let proxy = Arc::new(DeliveryProxy::new());
///
/// // No endpoint attached yet: events accumulate
/// proxy.heartbeat_succeeded(1);
/// assert_eq!(proxy.count_waiting(), 1);
/// ```
pub struct DeliveryProxy {
    state: Mutex<ProxyState>,
}

impl Default for DeliveryProxy {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryProxy {
    /// Create a detached proxy in active mode
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ProxyState {
                backlog: PendingQueue::new(),
                target: None,
                passive: false,
            }),
        }
    }

    /// Create a proxy in active mode with an endpoint already attached
    pub fn with_target(target: Arc<dyn ConsumerEndpoint>) -> Self {
        Self {
            state: Mutex::new(ProxyState {
                backlog: PendingQueue::new(),
                target: Some(target),
                passive: false,
            }),
        }
    }

    /// Replace the current endpoint
    ///
    /// Does not itself trigger a drain; the next accepted event or an
    /// explicit [`resend`](DeliveryProxy::resend) will use the new
    /// endpoint. Replacing the endpoint while entries are queued is the
    /// intended way to redirect backlog to a newly re-attached consumer.
    pub fn set_target(&self, target: Arc<dyn ConsumerEndpoint>) {
        let mut state = lock_recover(&self.state);
        state.target = Some(target);
    }

    /// Detach the current endpoint
    ///
    /// Subsequent drains are skipped and the backlog is retained until a
    /// new endpoint is attached.
    pub fn clear_target(&self) {
        let mut state = lock_recover(&self.state);
        state.target = None;
    }

    /// Try re-sending queued events to the current endpoint
    ///
    /// The only way to flush the backlog while in passive mode, and the
    /// usual follow-up to [`set_target`](DeliveryProxy::set_target). A
    /// no-op when the backlog is empty; skipped entirely when no endpoint
    /// is attached.
    pub fn resend(&self) {
        let mut state = lock_recover(&self.state);
        match state.target.clone() {
            Some(target) => state.backlog.drain(target.as_ref()),
            None => log::debug!(
                "Resend requested with no endpoint attached; {} waiting",
                state.backlog.size()
            ),
        }
    }

    /// Set whether accepting a new event should skip the automatic drain
    pub fn set_passive(&self, passive: bool) {
        let mut state = lock_recover(&self.state);
        state.passive = passive;
    }

    /// Whether the proxy only drains on explicit resend
    pub fn is_passive(&self) -> bool {
        lock_recover(&self.state).passive
    }

    /// Number of accepted-but-undelivered events
    pub fn count_waiting(&self) -> usize {
        lock_recover(&self.state).backlog.size()
    }

    /// Identity token of the current endpoint, `None` when detached
    pub fn raw_handle(&self) -> Option<RawHandle> {
        lock_recover(&self.state)
            .target
            .as_ref()
            .and_then(|target| target.raw_handle())
    }

    /// Accept a download-succeeded notification
    pub fn download_succeeded(&self, request_id: u32, payload: Vec<u8>) {
        self.accept(NotificationEvent::DownloadSucceeded {
            request_id,
            payload,
        });
    }

    /// Accept a download-to-file-succeeded notification
    pub fn download_to_file_succeeded(&self, request_id: u32) {
        self.accept(NotificationEvent::DownloadToFileSucceeded { request_id });
    }

    /// Accept a download-failed notification
    pub fn download_failed(&self, request_id: u32, code: i32, message: String) {
        self.accept(NotificationEvent::DownloadFailed {
            request_id,
            code,
            message,
        });
    }

    /// Accept a download progress report
    pub fn download_progress(&self, request_id: u32, have_bytes: u64, total_bytes: u64) {
        self.accept(NotificationEvent::DownloadProgress {
            request_id,
            have_bytes,
            total_bytes,
        });
    }

    /// Accept a heartbeat-succeeded notification
    pub fn heartbeat_succeeded(&self, request_id: u32) {
        self.accept(NotificationEvent::HeartbeatSucceeded { request_id });
    }

    /// Accept an auth-check-succeeded notification
    pub fn auth_check_succeeded(&self, request_id: u32) {
        self.accept(NotificationEvent::AuthCheckSucceeded { request_id });
    }

    /// Accept a remote-login-failed notification
    pub fn remote_login_failed(&self, request_id: u32, code: i32, message: String) {
        self.accept(NotificationEvent::RemoteLoginFailed {
            request_id,
            code,
            message,
        });
    }

    /// Accept a podcast-list-download-succeeded notification
    pub fn podcast_list_download_succeeded(&self, request_id: u32, podcasts: Vec<String>) {
        self.accept(NotificationEvent::PodcastListDownloadSucceeded {
            request_id,
            podcasts,
        });
    }

    /// Accept a podcast-list-download-failed notification
    pub fn podcast_list_download_failed(&self, request_id: u32, code: i32, message: String) {
        self.accept(NotificationEvent::PodcastListDownloadFailed {
            request_id,
            code,
            message,
        });
    }

    /// Enqueue `event`, then drain unless passive or detached
    ///
    /// Infallible by contract: entering the backlog is the unit of
    /// guaranteed work. The enqueue and the conditional drain form one
    /// critical section, so a drain can never lose an event accepted
    /// concurrently by another producer.
    fn accept(&self, event: NotificationEvent) {
        let mut state = lock_recover(&self.state);

        let sequence = state.backlog.enqueue(event);
        log::trace!("Accepted event as seq {}", sequence);

        if !state.passive {
            if let Some(target) = state.target.clone() {
                state.backlog.drain(target.as_ref());
            }
        }
    }
}

/// The proxy is itself substitutable wherever an endpoint is expected:
/// every invocation is accepted into the backlog and reported as
/// completed, since acceptance cannot fail.
impl ConsumerEndpoint for DeliveryProxy {
    fn download_succeeded(
        &self,
        request_id: u32,
        payload: &[u8],
    ) -> crate::notifications::error::TransportResult<()> {
        DeliveryProxy::download_succeeded(self, request_id, payload.to_vec());
        Ok(())
    }

    fn download_to_file_succeeded(
        &self,
        request_id: u32,
    ) -> crate::notifications::error::TransportResult<()> {
        DeliveryProxy::download_to_file_succeeded(self, request_id);
        Ok(())
    }

    fn download_failed(
        &self,
        request_id: u32,
        code: i32,
        message: &str,
    ) -> crate::notifications::error::TransportResult<()> {
        DeliveryProxy::download_failed(self, request_id, code, message.to_string());
        Ok(())
    }

    fn download_progress(
        &self,
        request_id: u32,
        have_bytes: u64,
        total_bytes: u64,
    ) -> crate::notifications::error::TransportResult<()> {
        DeliveryProxy::download_progress(self, request_id, have_bytes, total_bytes);
        Ok(())
    }

    fn heartbeat_succeeded(
        &self,
        request_id: u32,
    ) -> crate::notifications::error::TransportResult<()> {
        DeliveryProxy::heartbeat_succeeded(self, request_id);
        Ok(())
    }

    fn auth_check_succeeded(
        &self,
        request_id: u32,
    ) -> crate::notifications::error::TransportResult<()> {
        DeliveryProxy::auth_check_succeeded(self, request_id);
        Ok(())
    }

    fn remote_login_failed(
        &self,
        request_id: u32,
        code: i32,
        message: &str,
    ) -> crate::notifications::error::TransportResult<()> {
        DeliveryProxy::remote_login_failed(self, request_id, code, message.to_string());
        Ok(())
    }

    fn podcast_list_download_succeeded(
        &self,
        request_id: u32,
        podcasts: &[String],
    ) -> crate::notifications::error::TransportResult<()> {
        DeliveryProxy::podcast_list_download_succeeded(self, request_id, podcasts.to_vec());
        Ok(())
    }

    fn podcast_list_download_failed(
        &self,
        request_id: u32,
        code: i32,
        message: &str,
    ) -> crate::notifications::error::TransportResult<()> {
        DeliveryProxy::podcast_list_download_failed(self, request_id, code, message.to_string());
        Ok(())
    }

    fn raw_handle(&self) -> Option<RawHandle> {
        DeliveryProxy::raw_handle(self)
    }
}
