/// Domain errors of the secrets storage.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SecretsError {
    /// Secret doesn't exist or is owned by another user, the two cases are indistinguishable.
    #[error("secret not found")]
    NotFound,
    #[error("secret already exists")]
    Exists,
    /// Another secret of the same owner already has the requested name.
    #[error("secret with such name already exists")]
    NameConflict,
    #[error("no values to update")]
    NoValuesToUpdate,
}
