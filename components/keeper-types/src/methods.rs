//! Paths of the RPC methods exposed by the server.

pub const AUTH_LOGIN: &str = "/keeper.Auth/Login";
pub const USERS_REGISTER: &str = "/keeper.Users/Register";

pub const SECRETS_CREATE: &str = "/keeper.Secrets/Create";
pub const SECRETS_LIST: &str = "/keeper.Secrets/List";
pub const SECRETS_GET: &str = "/keeper.Secrets/Get";
pub const SECRETS_UPDATE: &str = "/keeper.Secrets/Update";
pub const SECRETS_DELETE: &str = "/keeper.Secrets/Delete";
