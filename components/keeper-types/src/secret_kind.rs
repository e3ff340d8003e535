use serde_derive::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Kind of the stored secret, determines how the decrypted `data` is decoded. Never changes after
/// the secret is created.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SecretKind {
    Binary = 1,
    Card = 2,
    Credentials = 3,
    Text = 4,
}

impl SecretKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretKind::Binary => "binary",
            SecretKind::Card => "card",
            SecretKind::Credentials => "credentials",
            SecretKind::Text => "text",
        }
    }
}

impl TryFrom<i32> for SecretKind {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SecretKind::Binary),
            2 => Ok(SecretKind::Card),
            3 => Ok(SecretKind::Credentials),
            4 => Ok(SecretKind::Text),
            unknown => Err(unknown),
        }
    }
}

impl From<SecretKind> for i32 {
    fn from(kind: SecretKind) -> Self {
        kind as i32
    }
}

impl Display for SecretKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
