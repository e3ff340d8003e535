mod error_kind;

use crate::users::{UsersError, secrets::SecretsError};
use actix_web::{HttpResponse, HttpResponseBuilder, ResponseError, http::StatusCode};
use anyhow::anyhow;
use keeper_types::{FieldViolation, Status};
use std::fmt::{Debug, Display, Formatter};

pub use error_kind::ErrorKind;

/// Message returned for every internal error, the details are only logged.
const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Error type returned by the RPC handlers.
#[derive(thiserror::Error)]
pub struct Error {
    root_cause: anyhow::Error,
    kind: ErrorKind,
    violations: Vec<FieldViolation>,
}

impl Error {
    /// Creates an invalid argument error with the given field violations.
    pub fn invalid_argument(violations: Vec<FieldViolation>) -> Self {
        Self {
            root_cause: anyhow!("invalid request"),
            kind: ErrorKind::InvalidArgument,
            violations,
        }
    }

    /// Creates an invalid argument error for a request that couldn't be parsed at all.
    pub fn malformed_request<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self {
            root_cause: anyhow!(message),
            kind: ErrorKind::InvalidArgument,
            violations: vec![],
        }
    }

    /// Creates an unauthenticated error that doesn't reveal which check failed.
    pub fn unauthenticated() -> Self {
        Self {
            root_cause: anyhow!("unauthenticated"),
            kind: ErrorKind::Unauthenticated,
            violations: vec![],
        }
    }

    /// Creates an internal error instance with the given root cause.
    pub fn internal(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::Internal,
            violations: vec![],
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Status body sent to the caller.
    pub fn status(&self) -> Status {
        Status {
            code: self.kind.code(),
            message: match self.kind {
                ErrorKind::Internal => INTERNAL_ERROR_MESSAGE.to_string(),
                _ => self.root_cause.to_string(),
            },
            violations: self.violations.clone(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind.code().http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).json(self.status())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        let kind = if let Some(err) = err.downcast_ref::<SecretsError>() {
            match err {
                SecretsError::NotFound => ErrorKind::NotFound,
                SecretsError::Exists | SecretsError::NameConflict => ErrorKind::AlreadyExists,
                SecretsError::NoValuesToUpdate => ErrorKind::InvalidArgument,
            }
        } else if let Some(err) = err.downcast_ref::<UsersError>() {
            match err {
                UsersError::UserExists => ErrorKind::AlreadyExists,
                UsersError::InvalidCredentials => ErrorKind::Unauthenticated,
            }
        } else {
            return err.downcast::<Error>().unwrap_or_else(Error::internal);
        };

        Error {
            root_cause: err,
            kind,
            violations: vec![],
        }
    }
}
