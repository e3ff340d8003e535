mod client_error;
mod request_error;

pub use self::{client_error::ClientError, request_error::RequestError};
