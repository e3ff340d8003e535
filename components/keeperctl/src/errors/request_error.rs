use keeper_types::{Code, FieldViolation, Status};
use std::fmt::{Display, Formatter};

/// Error returned by the keeper server, as opposed to the errors of the client itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub code: Code,
    pub message: String,
    pub violations: Vec<FieldViolation>,
}

impl RequestError {
    /// Builds the error from the status body of the failed call, falls back to the HTTP status if
    /// the body isn't a status (e.g. when the call is rejected by a proxy).
    pub fn from_response(http_status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<Status>(body) {
            Ok(status) => Self {
                code: status.code,
                message: status.message,
                violations: status.violations,
            },
            Err(_) => Self {
                code: Code::from_http_status(http_status),
                message: String::from_utf8_lossy(body).trim().to_string(),
                violations: vec![],
            },
        }
    }
}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)?;
        for violation in &self.violations {
            write!(f, "\n\t\"{}\": {}", violation.field, violation.description)?;
        }
        Ok(())
    }
}

impl std::error::Error for RequestError {}
