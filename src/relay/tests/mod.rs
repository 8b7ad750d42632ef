//! Tests for the store-and-forward relay
