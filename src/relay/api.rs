//! Public API for the relay
//!
//! This module provides the complete public API for the store-and-forward
//! relay. External modules should import from here rather than directly
//! from internal modules.

// The acceptance surface producers talk to
pub use crate::relay::proxy::DeliveryProxy;

// Backlog types (exposed so the retained backlog stays inspectable)
pub use crate::relay::queue::{PendingEntry, PendingQueue};
