use crate::errors::ClientError;
use openssl::{
    error::ErrorStack,
    symm::{Cipher, Crypter, Mode},
};
use std::fmt::{Debug, Formatter};

/// AES-256-GCM key size in bytes.
const KEY_SIZE: usize = 32;
/// AES-256-GCM nonce size in bytes.
const NONCE_SIZE: usize = 12;
/// AES-256-GCM authentication tag size in bytes.
const TAG_SIZE: usize = 16;

/// Symmetric key derived from the user credentials. Encrypts everything the client sends to the
/// server and is never sent itself, only its [`Key::hash`] is.
#[derive(Clone, PartialEq, Eq)]
pub struct Key([u8; KEY_SIZE]);

impl Key {
    /// Derives the key as `SHA-256(username + "@" + password)`. The same credentials always yield
    /// the same key.
    pub fn derive(username: &str, password: &str) -> Self {
        Self(openssl::sha::sha256(
            format!("{username}@{password}").as_bytes(),
        ))
    }

    /// Hex-encoded fingerprint of the key, used as the security key for login and registration.
    pub fn hash(&self) -> String {
        hex::encode(self.0)
    }

    /// Encrypts plaintext using AES-256-GCM with a random nonce and returns
    /// `nonce || ciphertext || tag`. Empty input is returned unchanged.
    pub fn encrypt(&self, plaintext: &[u8]) -> anyhow::Result<Vec<u8>> {
        if plaintext.is_empty() {
            return Ok(vec![]);
        }

        let cipher = Cipher::aes_256_gcm();
        let mut nonce = [0u8; NONCE_SIZE];
        openssl::rand::rand_bytes(&mut nonce)?;

        let mut crypter = Crypter::new(cipher, Mode::Encrypt, &self.0, Some(&nonce))?;
        let mut ciphertext = vec![0u8; plaintext.len() + cipher.block_size()];
        let mut count = crypter.update(plaintext, &mut ciphertext)?;
        count += crypter.finalize(&mut ciphertext[count..])?;
        ciphertext.truncate(count);

        let mut tag = [0u8; TAG_SIZE];
        crypter.get_tag(&mut tag)?;

        let mut output = Vec::with_capacity(NONCE_SIZE + ciphertext.len() + TAG_SIZE);
        output.extend_from_slice(&nonce);
        output.extend_from_slice(&ciphertext);
        output.extend_from_slice(&tag);

        Ok(output)
    }

    /// Decrypts data previously produced by [`Key::encrypt`]. Empty input is returned unchanged.
    /// Tampered, truncated or foreign data fails with [`ClientError::DecryptionFailed`].
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, ClientError> {
        if data.is_empty() {
            return Ok(vec![]);
        }

        if data.len() < NONCE_SIZE + TAG_SIZE {
            return Err(ClientError::DecryptionFailed);
        }

        self.open(data).map_err(|_| ClientError::DecryptionFailed)
    }

    fn open(&self, data: &[u8]) -> Result<Vec<u8>, ErrorStack> {
        let cipher = Cipher::aes_256_gcm();
        let nonce = &data[..NONCE_SIZE];
        let tag = &data[data.len() - TAG_SIZE..];
        let ciphertext = &data[NONCE_SIZE..data.len() - TAG_SIZE];

        let mut crypter = Crypter::new(cipher, Mode::Decrypt, &self.0, Some(nonce))?;
        crypter.set_tag(tag)?;

        let mut plaintext = vec![0u8; ciphertext.len() + cipher.block_size()];
        let mut count = crypter.update(ciphertext, &mut plaintext)?;
        count += crypter.finalize(&mut plaintext[count..])?;
        plaintext.truncate(count);

        Ok(plaintext)
    }
}

impl Debug for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key(****)")
    }
}
