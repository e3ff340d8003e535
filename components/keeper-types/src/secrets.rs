use crate::{SecretField, SecretKind};
use serde_derive::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use uuid::Uuid;

/// Empty message used by the calls that carry nothing but the caller identity.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Empty {}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateSecretRequest {
    pub name: String,
    pub kind: SecretKind,
    #[serde_as(as = "Base64")]
    #[serde(default)]
    pub metadata: Vec<u8>,
    #[serde_as(as = "Base64")]
    #[serde(default)]
    pub data: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateSecretResponse {
    pub id: Uuid,
}

/// Summary view of a secret. Never carries the `data` payload.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SecretInfo {
    pub id: Uuid,
    pub name: String,
    pub kind: SecretKind,
    #[serde_as(as = "Base64")]
    #[serde(default)]
    pub metadata: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSecretsResponse {
    pub secrets: Vec<SecretInfo>,
}

/// Identifies a secret by its id. The id is kept as a string so that a malformed value can be
/// reported as a field violation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GetSecretRequest {
    #[serde(default)]
    pub id: String,
}

pub type DeleteSecretRequest = GetSecretRequest;

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GetSecretResponse {
    pub secret: SecretInfo,
    #[serde_as(as = "Base64")]
    pub data: Vec<u8>,
}

/// Partial update of a secret: only the fields named in `update_mask` are applied, so empty values
/// are legitimate.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSecretRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub update_mask: Vec<SecretField>,
    #[serde(default)]
    pub name: String,
    #[serde_as(as = "Base64")]
    #[serde(default)]
    pub metadata: Vec<u8>,
    #[serde_as(as = "Base64")]
    #[serde(default)]
    pub data: Vec<u8>,
}
