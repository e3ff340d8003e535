use crate::{encryption::Key, repo::UsersRepository};
use tracing::debug;

/// Registers new users.
pub struct UsersService<R> {
    repo: R,
}

impl<R: UsersRepository> UsersService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers the user and returns an access token. The server only ever sees the key hash.
    pub async fn register(&self, username: &str, key: &Key) -> anyhow::Result<String> {
        let token = self.repo.register(username, &key.hash()).await?;
        debug!(user.name = username, "Registered new user.");
        Ok(token)
    }
}
