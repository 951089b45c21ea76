//! Error types for wall resets
//!
//! The reset path itself never fails: an unreadable sensor shows up as a zero
//! confidence reading. Errors only arise on the recording side.

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Wall reset error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Output file could not be opened or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Background recording task could not be started
    #[error("Failed to spawn recording task: {0}")]
    TaskSpawn(std::io::Error),
}
