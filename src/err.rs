use std::fmt::{self, Debug, Display};
use std::io;

pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

pub struct DisplayError(Error);

impl Debug for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T: Into<Error>> From<T> for DisplayError {
    fn from(display: T) -> Self {
        DisplayError(display.into())
    }
}

/// Configured redirects that cannot be served.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("unnamed parameter in path `{0}`")]
    UnnamedParam(String),
    #[error("`*` must be the whole last segment of path `{0}`")]
    MisplacedWildcard(String),
    #[error("invalid path `{path}`: {source}")]
    Insert {
        path: String,
        #[source]
        source: matchit::InsertError,
    },
    #[error("redirect target `{0}` is not a valid Location header")]
    InvalidTemplate(String),
}

pub trait IoErrorExt {
    fn applies_to(&self) -> AppliesTo;
}

impl IoErrorExt for io::Error {
    fn applies_to(&self) -> AppliesTo {
        match self.kind() {
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset => AppliesTo::Connection,
            _ => AppliesTo::Listener,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AppliesTo {
    Connection,
    Listener,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_errors_are_not_fatal() {
        for kind in [
            io::ErrorKind::ConnectionAborted,
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::ConnectionRefused,
        ] {
            assert_eq!(io::Error::from(kind).applies_to(), AppliesTo::Connection);
        }
        assert_eq!(
            io::Error::from(io::ErrorKind::AddrInUse).applies_to(),
            AppliesTo::Listener
        );
    }

    #[test]
    fn display_error_debug_is_display() {
        let e = DisplayError::from(RouteError::UnnamedParam("/a/:".to_string()));
        assert_eq!(format!("{:?}", e), "unnamed parameter in path `/a/:`");
    }
}
