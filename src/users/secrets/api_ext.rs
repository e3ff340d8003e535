use crate::{
    api::Api,
    users::{
        User,
        secrets::{Secret, SecretUpdate},
    },
};
use keeper_types::SecretKind;
use tracing::info;
use uuid::Uuid;

/// Secrets of a single owner. Every operation is scoped to the owner, so secrets of other users
/// are indistinguishable from the missing ones.
pub struct SecretsApiExt<'a> {
    api: &'a Api,
    user: &'a User,
}

impl<'a> SecretsApiExt<'a> {
    pub fn new(api: &'a Api, user: &'a User) -> Self {
        Self { api, user }
    }

    /// Stores a new secret and returns its id.
    pub async fn create_secret(
        &self,
        name: String,
        kind: SecretKind,
        metadata: Vec<u8>,
        data: Vec<u8>,
    ) -> anyhow::Result<Uuid> {
        let secret = Secret {
            id: Uuid::new_v4(),
            owner: self.user.id,
            name,
            kind,
            metadata,
            data: Some(data),
        };
        self.api.db.insert_secret(&secret).await?;

        info!(user.id = %self.user.id, secret.id = %secret.id, "Created secret.");
        Ok(secret.id)
    }

    /// Lists the owner's secrets without their data.
    pub async fn list_secrets(&self) -> anyhow::Result<Vec<Secret>> {
        self.api.db.get_secrets(self.user.id).await
    }

    /// Retrieves a single secret including its data.
    pub async fn get_secret(&self, id: Uuid) -> anyhow::Result<Secret> {
        self.api.db.get_secret(self.user.id, id).await
    }

    /// Applies the partial update to the secret.
    pub async fn update_secret(&self, id: Uuid, update: &SecretUpdate) -> anyhow::Result<()> {
        self.api.db.update_secret(self.user.id, id, update).await?;

        info!(user.id = %self.user.id, secret.id = %id, "Updated secret.");
        Ok(())
    }

    /// Removes the secret.
    pub async fn delete_secret(&self, id: Uuid) -> anyhow::Result<()> {
        self.api.db.remove_secret(self.user.id, id).await?;

        info!(user.id = %self.user.id, secret.id = %id, "Removed secret.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        tests::mock_api,
        users::secrets::{SecretUpdate, SecretsError},
    };
    use keeper_types::SecretKind;

    #[tokio::test]
    async fn manages_secrets_of_the_owner() -> anyhow::Result<()> {
        let api = mock_api().await?;
        let token = api.users().register("admin", "00ff").await?;
        let user = api.security().authenticate(&token)?.unwrap();
        let secrets = api.secrets(&user);

        let id = secrets
            .create_secret("note".to_string(), SecretKind::Text, vec![1], vec![2])
            .await?;

        let secret = secrets.get_secret(id).await?;
        assert_eq!(secret.owner, user.id);
        assert_eq!(secret.kind, SecretKind::Text);
        assert_eq!(secret.data, Some(vec![2]));

        let error = secrets
            .create_secret("note".to_string(), SecretKind::Binary, vec![], vec![3])
            .await
            .unwrap_err();
        assert_eq!(
            error.downcast_ref::<SecretsError>(),
            Some(&SecretsError::Exists)
        );

        secrets
            .update_secret(
                id,
                &SecretUpdate {
                    data: Some(vec![4]),
                    ..Default::default()
                },
            )
            .await?;
        assert_eq!(secrets.get_secret(id).await?.data, Some(vec![4]));

        let listed = secrets.list_secrets().await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].info().name, "note");
        assert_eq!(listed[0].data, None);

        secrets.delete_secret(id).await?;
        assert!(secrets.list_secrets().await?.is_empty());

        Ok(())
    }
}
