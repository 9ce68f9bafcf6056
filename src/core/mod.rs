//! Configuration and the value types that flow through one event.

pub mod config;
pub mod models;
