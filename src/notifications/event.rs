//! Event types for the notification system
//!
//! Each variant captures the complete value payload of one notification,
//! so an event can be replayed against any endpoint arbitrarily many times
//! with no side effects beyond the delivery attempt itself. The backlog of
//! undelivered events is therefore inspectable as plain data.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::notifications::error::TransportResult;
use crate::notifications::traits::ConsumerEndpoint;

/// Discriminant names for the event catalogue, used in log lines and
/// diagnostics
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
pub enum EventKind {
    DownloadSucceeded,
    DownloadToFileSucceeded,
    DownloadFailed,
    DownloadProgress,
    HeartbeatSucceeded,
    AuthCheckSucceeded,
    RemoteLoginFailed,
    PodcastListDownloadSucceeded,
    PodcastListDownloadFailed,
}

/// One unit of asynchronous information destined for a consumer endpoint
///
/// The catalogue is fixed: these are exactly the notifications the podcast
/// service can emit. Every variant carries the request id of the service
/// call it answers plus kind-specific value data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NotificationEvent {
    DownloadSucceeded {
        request_id: u32,
        payload: Vec<u8>,
    },
    DownloadToFileSucceeded {
        request_id: u32,
    },
    DownloadFailed {
        request_id: u32,
        code: i32,
        message: String,
    },
    DownloadProgress {
        request_id: u32,
        have_bytes: u64,
        total_bytes: u64,
    },
    HeartbeatSucceeded {
        request_id: u32,
    },
    AuthCheckSucceeded {
        request_id: u32,
    },
    RemoteLoginFailed {
        request_id: u32,
        code: i32,
        message: String,
    },
    PodcastListDownloadSucceeded {
        request_id: u32,
        podcasts: Vec<String>,
    },
    PodcastListDownloadFailed {
        request_id: u32,
        code: i32,
        message: String,
    },
}

impl NotificationEvent {
    /// The catalogue kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            NotificationEvent::DownloadSucceeded { .. } => EventKind::DownloadSucceeded,
            NotificationEvent::DownloadToFileSucceeded { .. } => EventKind::DownloadToFileSucceeded,
            NotificationEvent::DownloadFailed { .. } => EventKind::DownloadFailed,
            NotificationEvent::DownloadProgress { .. } => EventKind::DownloadProgress,
            NotificationEvent::HeartbeatSucceeded { .. } => EventKind::HeartbeatSucceeded,
            NotificationEvent::AuthCheckSucceeded { .. } => EventKind::AuthCheckSucceeded,
            NotificationEvent::RemoteLoginFailed { .. } => EventKind::RemoteLoginFailed,
            NotificationEvent::PodcastListDownloadSucceeded { .. } => {
                EventKind::PodcastListDownloadSucceeded
            }
            NotificationEvent::PodcastListDownloadFailed { .. } => {
                EventKind::PodcastListDownloadFailed
            }
        }
    }

    /// The request id of the service call this event answers
    pub fn request_id(&self) -> u32 {
        match self {
            NotificationEvent::DownloadSucceeded { request_id, .. }
            | NotificationEvent::DownloadToFileSucceeded { request_id }
            | NotificationEvent::DownloadFailed { request_id, .. }
            | NotificationEvent::DownloadProgress { request_id, .. }
            | NotificationEvent::HeartbeatSucceeded { request_id }
            | NotificationEvent::AuthCheckSucceeded { request_id }
            | NotificationEvent::RemoteLoginFailed { request_id, .. }
            | NotificationEvent::PodcastListDownloadSucceeded { request_id, .. }
            | NotificationEvent::PodcastListDownloadFailed { request_id, .. } => *request_id,
        }
    }

    /// Attempt to deliver this event to `endpoint`
    ///
    /// The single dispatch point between the catalogue and the endpoint
    /// contract: one invocation per variant, nothing else. An `Err` means
    /// the channel rejected the call and the event should stay queued.
    pub fn replay(&self, endpoint: &dyn ConsumerEndpoint) -> TransportResult<()> {
        match self {
            NotificationEvent::DownloadSucceeded {
                request_id,
                payload,
            } => endpoint.download_succeeded(*request_id, payload),
            NotificationEvent::DownloadToFileSucceeded { request_id } => {
                endpoint.download_to_file_succeeded(*request_id)
            }
            NotificationEvent::DownloadFailed {
                request_id,
                code,
                message,
            } => endpoint.download_failed(*request_id, *code, message),
            NotificationEvent::DownloadProgress {
                request_id,
                have_bytes,
                total_bytes,
            } => endpoint.download_progress(*request_id, *have_bytes, *total_bytes),
            NotificationEvent::HeartbeatSucceeded { request_id } => {
                endpoint.heartbeat_succeeded(*request_id)
            }
            NotificationEvent::AuthCheckSucceeded { request_id } => {
                endpoint.auth_check_succeeded(*request_id)
            }
            NotificationEvent::RemoteLoginFailed {
                request_id,
                code,
                message,
            } => endpoint.remote_login_failed(*request_id, *code, message),
            NotificationEvent::PodcastListDownloadSucceeded {
                request_id,
                podcasts,
            } => endpoint.podcast_list_download_succeeded(*request_id, podcasts),
            NotificationEvent::PodcastListDownloadFailed {
                request_id,
                code,
                message,
            } => endpoint.podcast_list_download_failed(*request_id, *code, message),
        }
    }
}
