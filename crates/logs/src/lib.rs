//! Fetches the event logs a contract emitted over a block range, decodes each payload against
//! the contract's JSON ABI, and renders a plain-text report.

/// Error types for the logs module
pub mod error;

mod core;
mod interfaces;
mod utils;

// re-export the public interface
pub use core::{logs, logs_with_source, LogsResult, ReportedLog};
pub use interfaces::{DecodedEvent, DecodedField, ItemSet, LogsArgs, LogsArgsBuilder};
pub use utils::{
    abi::{decode_payload, AbiDescriptor},
    filter::{fetch_logs, FilterCriteria},
    report::{render_log, render_signature_hash, topic_hex},
    schema::{EventField, EventRegistry, EventSchema},
};
