//! podrelay - store-and-forward delivery proxy for podcast service callbacks
//!
//! Producers hand notification events to a [`relay::api::DeliveryProxy`],
//! which retains every accepted event in an ordered backlog until it has
//! been delivered to the current consumer endpoint over an unreliable
//! channel. Delivery is at-least-once with best-effort ordering; the
//! endpoint can be replaced at any time and the retained backlog is
//! redirected to the replacement.

pub mod core;
pub mod notifications;
pub mod relay;
