#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("{0}")]
    Generic(String),
    #[error("Logs error: {0}")]
    LogsError(#[from] evlog_core::evlog_logs::error::Error),
}
