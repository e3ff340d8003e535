mod auth;
mod methods;
mod secret_field;
mod secret_kind;
mod secrets;
mod status;

pub use self::{
    auth::{AccessTokenResponse, CredentialsRequest},
    methods::{
        AUTH_LOGIN, SECRETS_CREATE, SECRETS_DELETE, SECRETS_GET, SECRETS_LIST, SECRETS_UPDATE,
        USERS_REGISTER,
    },
    secret_field::SecretField,
    secret_kind::SecretKind,
    secrets::{
        CreateSecretRequest, CreateSecretResponse, DeleteSecretRequest, Empty, GetSecretRequest,
        GetSecretResponse, ListSecretsResponse, SecretInfo,
        UpdateSecretRequest,
    },
    status::{Code, FieldViolation, Status},
};
