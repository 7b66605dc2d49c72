/// Failure of one pipeline stage. Every variant is fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The node could not be reached, or refused the connection.
    #[error("Connection error: {0}")]
    ConnectionError(String),
    /// The log query was malformed or rejected by the node.
    #[error("Query error: {0}")]
    QueryError(String),
    /// The ABI document is malformed, or does not describe the requested event.
    #[error("Format error: {0}")]
    FormatError(String),
    /// A log payload does not match the event's parameter layout.
    #[error("Decode error: {0}")]
    DecodeError(String),
    /// A log's `topic[0]` is not the selected event's signature hash.
    #[error("Signature mismatch: expected topic[0] {expected}, found {found}")]
    SignatureMismatch {
        /// The selector of the event being decoded.
        expected: String,
        /// What the log actually carried.
        found: String,
    },
    /// Anything else.
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
