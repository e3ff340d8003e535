use keeper_types::Code;

/// Describes how an error is reported to the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request, reported with per-field violations.
    InvalidArgument,
    /// Missing, invalid or expired token, or wrong credentials.
    Unauthenticated,
    /// Entity doesn't exist or belongs to someone else.
    NotFound,
    /// Entity with the same unique key already exists.
    AlreadyExists,
    /// Anything else, the details never leave the server.
    Internal,
}

impl ErrorKind {
    pub fn code(&self) -> Code {
        match self {
            ErrorKind::InvalidArgument => Code::InvalidArgument,
            ErrorKind::Unauthenticated => Code::Unauthenticated,
            ErrorKind::NotFound => Code::NotFound,
            ErrorKind::AlreadyExists => Code::AlreadyExists,
            ErrorKind::Internal => Code::Internal,
        }
    }
}
