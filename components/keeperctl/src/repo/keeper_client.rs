use crate::{
    errors::RequestError,
    repo::{AuthRepository, SecretsRepository, UsersRepository},
};
use anyhow::Context;
use keeper_types::{
    AUTH_LOGIN, AccessTokenResponse, CreateSecretRequest, CreateSecretResponse,
    CredentialsRequest, Empty, GetSecretRequest, GetSecretResponse, ListSecretsResponse,
    SECRETS_CREATE, SECRETS_DELETE, SECRETS_GET, SECRETS_LIST, SECRETS_UPDATE, SecretInfo,
    USERS_REGISTER, UpdateSecretRequest,
};
use reqwest::{Certificate, Client, header::AUTHORIZATION};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;
use uuid::Uuid;

/// Repositories backed by the keeper server.
#[derive(Clone, Debug)]
pub struct KeeperClient {
    client: Client,
    address: String,
}

impl KeeperClient {
    /// Creates a client for the server at `address` (e.g. `https://127.0.0.1:9090`). The server
    /// certificate is additionally trusted if it's issued by the PEM-encoded `ca_certificate`.
    pub fn new(address: &str, ca_certificate: Option<&[u8]>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(ca_certificate) = ca_certificate {
            builder = builder.add_root_certificate(
                Certificate::from_pem(ca_certificate)
                    .with_context(|| "Failed to parse CA certificate.")?,
            );
        }

        Ok(Self {
            client: builder
                .build()
                .with_context(|| "Failed to build HTTP client.")?,
            address: address.trim_end_matches('/').to_string(),
        })
    }

    /// Invokes the RPC method, any non-successful status is returned as [`RequestError`].
    async fn call<Req: Serialize + Sync, Resp: DeserializeOwned>(
        &self,
        method: &str,
        token: Option<&str>,
        request: &Req,
    ) -> anyhow::Result<Resp> {
        debug!(rpc.method = method, "Calling keeper.");

        let mut request = self
            .client
            .post(format!("{}{method}", self.address))
            .json(request);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to call {method}."))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(RequestError::from_response(status.as_u16(), &body).into());
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {method} response."))
    }
}

impl AuthRepository for KeeperClient {
    async fn login(&self, username: &str, security_key: &str) -> anyhow::Result<String> {
        let response: AccessTokenResponse = self
            .call(
                AUTH_LOGIN,
                None,
                &CredentialsRequest {
                    username: username.to_string(),
                    security_key: security_key.to_string(),
                },
            )
            .await?;
        Ok(response.access_token)
    }
}

impl UsersRepository for KeeperClient {
    async fn register(&self, username: &str, security_key: &str) -> anyhow::Result<String> {
        let response: AccessTokenResponse = self
            .call(
                USERS_REGISTER,
                None,
                &CredentialsRequest {
                    username: username.to_string(),
                    security_key: security_key.to_string(),
                },
            )
            .await?;
        Ok(response.access_token)
    }
}

impl SecretsRepository for KeeperClient {
    async fn create(&self, token: &str, request: CreateSecretRequest) -> anyhow::Result<Uuid> {
        let response: CreateSecretResponse =
            self.call(SECRETS_CREATE, Some(token), &request).await?;
        Ok(response.id)
    }

    async fn list(&self, token: &str) -> anyhow::Result<Vec<SecretInfo>> {
        let response: ListSecretsResponse = self.call(SECRETS_LIST, Some(token), &Empty {}).await?;
        Ok(response.secrets)
    }

    async fn get(&self, token: &str, id: Uuid) -> anyhow::Result<GetSecretResponse> {
        self.call(
            SECRETS_GET,
            Some(token),
            &GetSecretRequest { id: id.to_string() },
        )
        .await
    }

    async fn update(&self, token: &str, request: UpdateSecretRequest) -> anyhow::Result<()> {
        let _: Empty = self.call(SECRETS_UPDATE, Some(token), &request).await?;
        Ok(())
    }

    async fn delete(&self, token: &str, id: Uuid) -> anyhow::Result<()> {
        let _: Empty = self
            .call(
                SECRETS_DELETE,
                Some(token),
                &GetSecretRequest { id: id.to_string() },
            )
            .await?;
        Ok(())
    }
}
