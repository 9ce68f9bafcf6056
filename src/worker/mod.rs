//! Per-event processing: summarizing and fanning out one inbound message.

pub mod dispatch;
pub mod handler;
pub mod summarize;

// Re-export the main entry points for convenience
pub use dispatch::FanoutDispatcher;
pub use handler::{process_event, spawn_event};
pub use summarize::Summarizer;
