pub mod api_ext;
mod database_ext;
mod secret;
mod secret_update;
mod secrets_error;

pub use self::{secret::Secret, secret_update::SecretUpdate, secrets_error::SecretsError};
