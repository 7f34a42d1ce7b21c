use std::fmt;

/// Result type for cardwall-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the client layer
#[derive(Debug)]
pub enum Error {
    /// HTTP transport failure (connect, TLS, non-success status)
    Http(Box<ureq::Error>),

    /// GraphQL-level errors carried in the response envelope
    Api(Vec<String>),

    /// Response body did not match the expected shape
    Decode(serde_json::Error),

    /// Response was well-formed but the requested entity is absent
    MissingData(String),

    /// Detail viewer subprocess failed
    Viewer(String),

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(err) => write!(f, "HTTP error: {}", err),
            Error::Api(messages) => write!(f, "GraphQL error: {}", messages.join("; ")),
            Error::Decode(err) => write!(f, "Decode error: {}", err),
            Error::MissingData(msg) => write!(f, "Missing data: {}", msg),
            Error::Viewer(msg) => write!(f, "Viewer error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(err) => Some(err),
            Error::Decode(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Api(_) | Error::MissingData(_) | Error::Viewer(_) => None,
        }
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Error::Http(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
