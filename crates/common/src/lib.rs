//! Common utilities, constants, and resources used across the evlog codebase.
//!
//! This crate provides shared functionality for the evlog toolkit: the node
//! connection wrapper, event signature hashing, and general utility functions.

/// Constants used throughout the evlog codebase.
pub mod constants;

/// Utilities for interacting with Ethereum nodes and event signatures.
pub mod ether;

/// General utility functions and types for common tasks.
pub mod utils;
