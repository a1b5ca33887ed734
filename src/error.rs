//! Unified error type.

use std::fmt;
use std::net::AddrParseError;

/// The error type returned by strata's fallible operations.
///
/// Application-level errors (403, 404, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. Middleware chains
/// never produce one either. This type surfaces infrastructure failures:
/// parsing the bind address, binding to a port, or accepting a connection.
#[derive(Debug)]
pub enum Error {
    /// The address given to [`Server::bind`](crate::Server::bind) is not a
    /// valid `host:port` pair.
    Addr(AddrParseError),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Addr(e) => write!(f, "invalid bind address: {e}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Addr(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<AddrParseError> for Error {
    fn from(e: AddrParseError) -> Self {
        Self::Addr(e)
    }
}
