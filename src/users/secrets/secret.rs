use crate::users::UserId;
use keeper_types::{SecretInfo, SecretKind};
use uuid::Uuid;

/// Secret as it's stored. `metadata` and `data` are ciphertext the server never decrypts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    pub id: Uuid,
    pub owner: UserId,
    pub name: String,
    pub kind: SecretKind,
    pub metadata: Vec<u8>,
    /// Populated only when a single secret is retrieved, never when secrets are listed.
    pub data: Option<Vec<u8>>,
}

impl Secret {
    /// Returns the summary view of the secret that is sent to the client.
    pub fn info(&self) -> SecretInfo {
        SecretInfo {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            metadata: self.metadata.clone(),
        }
    }
}
