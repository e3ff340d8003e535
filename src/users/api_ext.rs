use crate::{
    api::Api,
    security::{AccessToken, StoredCredentials},
    users::{User, UserId},
};
use tracing::info;
use uuid::Uuid;

/// Registration of the new user accounts.
pub struct UsersApiExt<'a> {
    api: &'a Api,
}

impl<'a> UsersApiExt<'a> {
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    /// Creates a user with the given username and security key, and issues an access token.
    pub async fn register(
        &self,
        username: &str,
        security_key: &str,
    ) -> anyhow::Result<AccessToken> {
        let user = User {
            id: UserId::from(Uuid::new_v4()),
            username: username.to_string(),
        };

        let credentials = StoredCredentials::hash(security_key).await?;
        self.api.db.insert_user(&user, &credentials).await?;

        info!(user.id = %user.id, "Registered new user.");
        AccessToken::issue(&user, &self.api.config.security.jwt_secret)
    }
}

#[cfg(test)]
mod tests {
    use crate::{tests::mock_api, users::UsersError};

    #[tokio::test]
    async fn can_register_users() -> anyhow::Result<()> {
        let api = mock_api().await?;

        let token = api.users().register("admin", "00ff").await?;
        let user = api.security().authenticate(&token)?.unwrap();
        assert_eq!(user.username, "admin");

        let stored_user = api.db.get_user_by_username("admin").await?.unwrap();
        assert_eq!(stored_user.user, user);
        assert_ne!(stored_user.credentials.security_key_hash, "00ff");

        Ok(())
    }

    #[tokio::test]
    async fn fails_to_register_existing_user() -> anyhow::Result<()> {
        let api = mock_api().await?;
        api.users().register("admin", "00ff").await?;

        let error = api.users().register("admin", "0000").await.unwrap_err();
        assert_eq!(
            error.downcast_ref::<UsersError>(),
            Some(&UsersError::UserExists)
        );

        Ok(())
    }
}
