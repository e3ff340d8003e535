use anyhow::Context;
use keeper_types::SecretKind;
use serde_derive::{Deserialize, Serialize};

/// Arbitrary binary data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    pub data: Vec<u8>,
}

/// Bank card details.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub number: String,
    pub expiration: String,
    pub holder: String,
    pub cvv: u32,
}

/// Login and password pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// Arbitrary text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub text: String,
}

/// Decrypted `data` of a secret. The variant always corresponds to the secret kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretPayload {
    Binary(Binary),
    Card(Card),
    Credentials(Credentials),
    Text(Text),
}

impl SecretPayload {
    pub fn kind(&self) -> SecretKind {
        match self {
            SecretPayload::Binary(_) => SecretKind::Binary,
            SecretPayload::Card(_) => SecretKind::Card,
            SecretPayload::Credentials(_) => SecretKind::Credentials,
            SecretPayload::Text(_) => SecretKind::Text,
        }
    }

    /// Serializes the payload without the kind, the kind is stored with the secret.
    pub fn encode(&self) -> anyhow::Result<Vec<u8>> {
        match self {
            SecretPayload::Binary(binary) => postcard::to_allocvec(binary),
            SecretPayload::Card(card) => postcard::to_allocvec(card),
            SecretPayload::Credentials(credentials) => postcard::to_allocvec(credentials),
            SecretPayload::Text(text) => postcard::to_allocvec(text),
        }
        .with_context(|| format!("Failed to serialize {} secret.", self.kind()))
    }

    /// Deserializes the payload according to the kind of the secret it belongs to.
    pub fn decode(kind: SecretKind, bytes: &[u8]) -> anyhow::Result<Self> {
        match kind {
            SecretKind::Binary => postcard::from_bytes(bytes).map(SecretPayload::Binary),
            SecretKind::Card => postcard::from_bytes(bytes).map(SecretPayload::Card),
            SecretKind::Credentials => postcard::from_bytes(bytes).map(SecretPayload::Credentials),
            SecretKind::Text => postcard::from_bytes(bytes).map(SecretPayload::Text),
        }
        .with_context(|| format!("Failed to deserialize {kind} secret."))
    }

    /// Named values of the payload in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            SecretPayload::Binary(binary) => vec![("data", hex::encode(&binary.data))],
            SecretPayload::Card(card) => vec![
                ("number", card.number.clone()),
                ("expiration", card.expiration.clone()),
                ("holder", card.holder.clone()),
                ("cvv", card.cvv.to_string()),
            ],
            SecretPayload::Credentials(credentials) => vec![
                ("login", credentials.login.clone()),
                ("password", credentials.password.clone()),
            ],
            SecretPayload::Text(text) => vec![("text", text.text.clone())],
        }
    }
}
