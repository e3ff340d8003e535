mod keeper_client;

use keeper_types::{CreateSecretRequest, GetSecretResponse, SecretInfo, UpdateSecretRequest};
use std::future::Future;
use uuid::Uuid;

pub use self::keeper_client::KeeperClient;

/// Obtains access tokens for the existing users.
pub trait AuthRepository {
    fn login(
        &self,
        username: &str,
        security_key: &str,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}

/// Registers new users.
pub trait UsersRepository {
    fn register(
        &self,
        username: &str,
        security_key: &str,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}

/// Stores the encrypted secrets of the user the access token is issued for.
pub trait SecretsRepository {
    fn create(
        &self,
        token: &str,
        request: CreateSecretRequest,
    ) -> impl Future<Output = anyhow::Result<Uuid>> + Send;

    fn list(&self, token: &str) -> impl Future<Output = anyhow::Result<Vec<SecretInfo>>> + Send;

    fn get(
        &self,
        token: &str,
        id: Uuid,
    ) -> impl Future<Output = anyhow::Result<GetSecretResponse>> + Send;

    fn update(
        &self,
        token: &str,
        request: UpdateSecretRequest,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn delete(&self, token: &str, id: Uuid) -> impl Future<Output = anyhow::Result<()>> + Send;
}
