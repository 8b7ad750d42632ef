//! Public API for the notification types
//!
//! This module provides the complete public API for the notification side
//! of the crate. External modules should import from here rather than
//! directly from internal modules.

// Core event types and enums
pub use crate::notifications::event::{EventKind, NotificationEvent};

// Error handling
pub use crate::notifications::error::{TransportError, TransportResult};

// Traits and endpoint identity
pub use crate::notifications::traits::{ConsumerEndpoint, RawHandle};
