use std::fmt::{self, Display};

/// The kind of error that occurred.
///
/// Every kind is fatal to the request that produced it, providers never
/// retry on their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The backend could not be reached, or the connection broke.
    Transport,
    /// The backend answered, but reported an error.
    Backend,
    /// The backend answered with something that can't be understood.
    InvalidResponse,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "Transport error"),
            ErrorKind::Backend => write!(f, "Backend error"),
            ErrorKind::InvalidResponse => write!(f, "Invalid response"),
        }
    }
}
