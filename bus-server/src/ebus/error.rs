//! eBus client error types.

use std::fmt;

/// Errors from the eBus HTTP client.
#[derive(Debug)]
pub enum EbusError {
    /// HTTP request failed (network error, connection reset, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// Site returned an error status code
    Api { status: u16, message: String },

    /// The stop list did not materialise within the readiness window
    Timeout { secs: u64 },
}

impl fmt::Display for EbusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EbusError::Http(e) => write!(f, "HTTP error: {e}"),
            EbusError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            EbusError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            EbusError::Timeout { secs } => {
                write!(f, "stop list did not load within {secs}s")
            }
        }
    }
}

impl std::error::Error for EbusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EbusError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for EbusError {
    fn from(err: reqwest::Error) -> Self {
        EbusError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EbusError::Timeout { secs: 10 };
        assert_eq!(err.to_string(), "stop list did not load within 10s");

        let err = EbusError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = EbusError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("<html>"));
    }
}
