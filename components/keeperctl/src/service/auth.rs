use crate::{encryption::Key, repo::AuthRepository};
use tracing::debug;

/// Logs existing users in.
pub struct AuthService<R> {
    repo: R,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns an access token for the user, proving the knowledge of the key with its hash.
    pub async fn login(&self, username: &str, key: &Key) -> anyhow::Result<String> {
        let token = self.repo.login(username, &key.hash()).await?;
        debug!(user.name = username, "Logged in.");
        Ok(token)
    }
}
