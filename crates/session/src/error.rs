use std::path::PathBuf;

use regform_core::CoreError;

/// Errors raised while loading data or driving a form session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A domain-level error from `regform_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A reference or configuration file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for session results.
pub type SessionResult<T> = Result<T, SessionError>;
