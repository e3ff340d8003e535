use crate::{
    encryption::Key,
    errors::ClientError,
    payload::SecretPayload,
    repo::SecretsRepository,
    service::SecretEdit,
};
use keeper_types::{CreateSecretRequest, SecretField, SecretInfo, SecretKind, UpdateSecretRequest};
use tracing::debug;
use uuid::Uuid;

/// Decrypted summary of a secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSummary {
    pub id: Uuid,
    pub name: String,
    pub kind: SecretKind,
    pub description: String,
}

/// Encrypts secrets before they are sent to the keeper and decrypts them once they're retrieved.
pub struct SecretsService<R> {
    key: Key,
    repo: R,
}

impl<R: SecretsRepository> SecretsService<R> {
    pub fn new(key: Key, repo: R) -> Self {
        Self { key, repo }
    }

    /// Stores a new secret. Description and payload are encrypted independently.
    pub async fn push(
        &self,
        token: &str,
        name: &str,
        description: &str,
        payload: &SecretPayload,
    ) -> anyhow::Result<Uuid> {
        let id = self
            .repo
            .create(
                token,
                CreateSecretRequest {
                    name: name.to_string(),
                    kind: payload.kind(),
                    metadata: self.key.encrypt(description.as_bytes())?,
                    data: self.key.encrypt(&payload.encode()?)?,
                },
            )
            .await?;
        debug!(secret.id = %id, "Secret saved.");
        Ok(id)
    }

    /// Lists secrets of the user. Fails entirely if any description can't be decrypted.
    pub async fn list(&self, token: &str) -> anyhow::Result<Vec<SecretSummary>> {
        self.repo
            .list(token)
            .await?
            .into_iter()
            .map(|info| self.summary(info))
            .collect()
    }

    /// Retrieves the secret and decodes its payload according to the secret kind.
    pub async fn get(
        &self,
        token: &str,
        id: Uuid,
    ) -> anyhow::Result<(SecretSummary, SecretPayload)> {
        let response = self.repo.get(token, id).await?;
        let summary = self.summary(response.secret)?;
        let payload = SecretPayload::decode(summary.kind, &self.key.decrypt(&response.data)?)?;
        Ok((summary, payload))
    }

    /// Applies the edit. The stored payload is only fetched when the payload changes, in that case
    /// the patch must match the secret kind.
    pub async fn edit(&self, token: &str, id: Uuid, edit: SecretEdit) -> anyhow::Result<()> {
        let mut request = UpdateSecretRequest {
            id: id.to_string(),
            ..Default::default()
        };

        if let Some(name) = edit.name.filter(|name| !name.is_empty()) {
            request.update_mask.push(SecretField::Name);
            request.name = name;
        }

        if edit.no_description {
            request.update_mask.push(SecretField::Metadata);
        } else if let Some(description) = edit.description.filter(|value| !value.is_empty()) {
            request.update_mask.push(SecretField::Metadata);
            request.metadata = self.key.encrypt(description.as_bytes())?;
        }

        if !edit.payload.is_empty() {
            let (_, payload) = self.get(token, id).await?;
            let payload = edit.payload.apply(payload)?;
            request.update_mask.push(SecretField::Data);
            request.data = self.key.encrypt(&payload.encode()?)?;
        }

        if request.update_mask.is_empty() {
            return Err(ClientError::NothingToUpdate.into());
        }

        self.repo.update(token, request).await?;
        debug!(secret.id = %id, "Secret updated.");
        Ok(())
    }

    pub async fn delete(&self, token: &str, id: Uuid) -> anyhow::Result<()> {
        self.repo.delete(token, id).await?;
        debug!(secret.id = %id, "Secret deleted.");
        Ok(())
    }

    fn summary(&self, info: SecretInfo) -> anyhow::Result<SecretSummary> {
        Ok(SecretSummary {
            description: String::from_utf8_lossy(&self.key.decrypt(&info.metadata)?).into_owned(),
            id: info.id,
            name: info.name,
            kind: info.kind,
        })
    }
}
