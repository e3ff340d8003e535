use crate::{
    api::Api,
    security::{AccessToken, StoredCredentials},
    users::{User, UserId, UsersError},
};
use anyhow::Context;
use tracing::warn;
use uuid::Uuid;

/// Authentication of the registered users.
pub struct SecurityApiExt<'a> {
    api: &'a Api,
}

impl<'a> SecurityApiExt<'a> {
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    /// Verifies the security key of the user and issues an access token.
    pub async fn login(&self, username: &str, security_key: &str) -> anyhow::Result<AccessToken> {
        let Some(stored_user) = self.api.db.get_user_by_username(username).await? else {
            // Same Argon2 cost as for the existing users.
            StoredCredentials::hash(security_key).await?;
            warn!(user.name = username, "Login attempt for unknown user.");
            return Err(UsersError::InvalidCredentials.into());
        };

        if !stored_user.credentials.check(security_key).await? {
            warn!(user.id = %stored_user.user.id, "Login attempt with wrong security key.");
            return Err(UsersError::InvalidCredentials.into());
        }

        AccessToken::issue(&stored_user.user, &self.api.config.security.jwt_secret)
    }

    /// Recovers the user identity from the access token. Returns `None` if the token doesn't pass
    /// verification, and an error if a correctly signed token carries a malformed subject.
    pub fn authenticate(&self, token: &AccessToken) -> anyhow::Result<Option<User>> {
        let claims = match token.decode(&self.api.config.security.jwt_secret) {
            Ok(claims) => claims,
            Err(err) => {
                warn!("Rejected access token: {err}");
                return Ok(None);
            }
        };

        let id = Uuid::parse_str(&claims.sub)
            .with_context(|| format!("Access token subject is not a user id ({}).", claims.sub))?;

        Ok(Some(User {
            id: UserId::from(id),
            username: claims.username,
        }))
    }
}
