mod auth_login;
mod secrets;
mod users_register;

use crate::error::{Error, ErrorKind};
use tracing::{error, info};

pub use self::{
    auth_login::auth_login,
    secrets::{secrets_create, secrets_delete, secrets_get, secrets_list, secrets_update},
    users_register::users_register,
};

/// Converts a business logic error into the call status. Internal errors are logged with the full
/// chain since the caller only gets a generic message.
fn rpc_error(err: anyhow::Error) -> Error {
    let err = Error::from(err);
    match err.kind() {
        ErrorKind::Internal => error!("Call failed: {err:?}"),
        _ => info!("Call rejected: {err}"),
    }
    err
}
