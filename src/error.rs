//! Error types for the chorewheel crate.
//!
//! Errors carry stable, human-readable messages suitable for console
//! display. The integration token never appears in error messages.

/// Errors that can occur while planning and creating chore tasks.
#[derive(Debug, thiserror::Error)]
pub enum ChoreError {
    /// Required configuration is missing or invalid.
    #[error("config error: {0}")]
    Config(String),

    /// An HTTP request to the Notion API could not be sent or completed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The Notion API rejected a request with an error status.
    #[error("Notion API error: {0}")]
    Api(String),

    /// A Notion response could not be decoded into the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenience type alias for chorewheel results.
pub type Result<T> = std::result::Result<T, ChoreError>;
