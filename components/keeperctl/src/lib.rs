pub mod encryption;
pub mod errors;
pub mod payload;
pub mod repo;
pub mod service;

pub use self::{
    encryption::Key,
    errors::{ClientError, RequestError},
    payload::SecretPayload,
};
