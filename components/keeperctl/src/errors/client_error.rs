use keeper_types::SecretKind;

/// Errors detected by the client itself, without the server being involved.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Data can't be authenticated with the key: it was tampered with, corrupted or encrypted with
    /// other credentials.
    #[error("failed to decrypt data, it is corrupted or was encrypted with different credentials")]
    DecryptionFailed,
    #[error("secret kind doesn't match: expected {expected}, but the secret is {actual}")]
    KindMismatch {
        expected: SecretKind,
        actual: SecretKind,
    },
    #[error("at least one value to update is required")]
    NothingToUpdate,
}
