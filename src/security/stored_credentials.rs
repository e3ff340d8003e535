use anyhow::{anyhow, bail};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use tokio::task;

/// Size of the random salt mixed into every security key hash.
const SALT_SIZE: usize = 16;

/// Server-side verifier of the user security key. The key itself is never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Argon2id PHC string of the security key.
    pub security_key_hash: String,
}

impl StoredCredentials {
    /// Hashes the provided security key with a fresh random salt.
    pub fn try_from_security_key(security_key: &str) -> anyhow::Result<Self> {
        if security_key.is_empty() {
            bail!("Security key cannot be empty.");
        }

        let mut salt = [0u8; SALT_SIZE];
        openssl::rand::rand_bytes(&mut salt)?;
        let salt = SaltString::encode_b64(&salt)
            .map_err(|err| anyhow!("Failed to encode a salt: {err}"))?;

        Ok(Self {
            security_key_hash: argon2_instance()
                .hash_password(security_key.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| anyhow!("Failed to generate a security key hash: {err}"))?,
        })
    }

    /// Hashes the security key on the blocking thread pool.
    pub async fn hash(security_key: &str) -> anyhow::Result<Self> {
        let security_key = security_key.to_string();
        task::spawn_blocking(move || Self::try_from_security_key(&security_key)).await?
    }

    /// Verifies the security key on the blocking thread pool.
    pub async fn check(&self, security_key: &str) -> anyhow::Result<bool> {
        let credentials = self.clone();
        let security_key = security_key.to_string();
        task::spawn_blocking(move || credentials.verify(&security_key)).await?
    }

    /// Checks whether the provided security key matches the stored hash.
    pub fn verify(&self, security_key: &str) -> anyhow::Result<bool> {
        let hash = PasswordHash::new(&self.security_key_hash)
            .map_err(|err| anyhow!("Stored security key hash is malformed: {err}"))?;

        Ok(argon2_instance()
            .verify_password(security_key.as_bytes(), &hash)
            .is_ok())
    }
}

#[cfg(not(test))]
fn argon2_instance() -> Argon2<'static> {
    Argon2::default()
}

#[cfg(test)]
fn argon2_instance() -> Argon2<'static> {
    use argon2::{Algorithm, Params, Version};

    let params = Params::new(1024, 1, 1, None).expect("valid Argon2 params for tests");
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}
