//! Utility modules for process-level concerns

pub mod signals;

pub use signals::shutdown_channel;

// vim: ts=4
