//! The Core module serves as the central integration point for evlog's functionality.
//!
//! This module re-exports the public interfaces of the tool-specific crates, making it easier
//! to use evlog's capabilities in other projects.

// Re-export all tool-specific modules
pub use evlog_logs;
