//! Error types for the toxictl domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Errors fall into two
//! families: input errors, raised before anything is sent to the service,
//! and service errors, reported by (or while reaching) the administration
//! service.

use crate::toxic::Stream;
use thiserror::Error;

/// The top-level error type for all toxictl operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Input errors ---
    #[error("Required argument '{0}' was empty")]
    MissingArgument(String),

    #[error("Fields must be key=value,key=value (got '{0}')")]
    MalformedFields(String),

    #[error("Toxic field was expected to be an integer: {key}={value}")]
    NonIntegerField { key: String, value: String },

    #[error("Unknown field '{field}' for {kind} toxic")]
    UnknownField { kind: String, field: String },

    // --- Service errors ---
    #[error("Proxy not found: {0}")]
    NotFound(String),

    #[error("Toxic '{toxic}' not found on proxy '{proxy}'")]
    ToxicNotFound { proxy: String, toxic: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service error: {message} (status: {status})")]
    Service { status: u16, message: String },

    #[error("Failed to reach the administration service: {0}")]
    Connection(String),

    #[error("Unexpected response from the administration service: {0}")]
    Protocol(String),

    // --- Multi-step operations ---
    #[error("Added {added} toxic '{toxic}' but failed to add {failed} toxic: {source}")]
    PartialAdd {
        toxic: String,
        added: Stream,
        failed: Stream,
        #[source]
        source: Box<Error>,
    },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error was raised from user input rather than by the service.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Error::MissingArgument(_)
                | Error::MalformedFields(_)
                | Error::NonIntegerField { .. }
                | Error::UnknownField { .. }
        )
    }

    pub fn missing(argument: impl Into<String>) -> Self {
        Error::MissingArgument(argument.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_displays_correctly() {
        let err = Error::Service {
            status: 400,
            message: "invalid toxic type: jitterbug".into(),
        };
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("jitterbug"));
        assert!(!err.is_input());
    }

    #[test]
    fn input_errors_are_categorized() {
        assert!(Error::missing("listen").is_input());
        assert!(Error::MalformedFields("latency".into()).is_input());
        assert!(!Error::NotFound("redis".into()).is_input());
    }

    #[test]
    fn partial_add_names_both_directions() {
        let err = Error::PartialAdd {
            toxic: "lag".into(),
            added: Stream::Upstream,
            failed: Stream::Downstream,
            source: Box::new(Error::Conflict("toxic already exists".into())),
        };
        let msg = err.to_string();
        assert!(msg.contains("upstream"));
        assert!(msg.contains("downstream"));
        assert!(msg.contains("already exists"));
    }
}
