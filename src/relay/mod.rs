//! Store-and-Forward Relay Component
//!
//! An ordered backlog of undelivered notification events plus the delivery
//! proxy that fills and drains it. Producers call the proxy's acceptance
//! operations; the proxy wraps each call as a queue entry and, unless in
//! passive mode, immediately attempts to drain the backlog against the
//! current consumer endpoint. Entries whose delivery the channel rejects
//! stay queued in their original relative order and are retried on every
//! subsequent drain.
//!
//! # Control flow
//!
//! ```text
//! ┌──────────┐ accept  ┌───────────────┐ enqueue ┌──────────────┐
//! │ Producer │────────▶│ DeliveryProxy │────────▶│ PendingQueue │
//! └──────────┘         └───────┬───────┘         └──────┬───────┘
//!                              │ drain (active mode,    │ replay per
//!                              │ or explicit resend)    │ entry, FIFO
//!                              ▼                        ▼
//!                      ┌────────────────────────────────────────┐
//!                      │ current ConsumerEndpoint (replaceable) │
//!                      └────────────────────────────────────────┘
//! ```
//!
//! Acceptance never fails from the producer's point of view: entering the
//! backlog is the unit of guaranteed work, not the downstream delivery.

// Internal modules - all access should go through the api module
pub(crate) mod proxy;
pub(crate) mod queue;

// Public API module - the only public interface for the relay
pub mod api;

#[cfg(test)]
pub(crate) mod tests;
