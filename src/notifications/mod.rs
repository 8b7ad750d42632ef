// Internal modules - all access should go through the api module
pub(crate) mod error;
pub(crate) mod event;
pub(crate) mod traits;

// Public API module - the only public interface for the notification types
pub mod api;
