//! HTTP surface: Events API intake and the OAuth install callback

pub mod event_handler;
pub mod handler;
pub mod helpers;
pub mod oauth;
pub mod parsing;
pub mod signature;

// Re-export the router and its state for convenience
pub use handler::{AppState, router};
