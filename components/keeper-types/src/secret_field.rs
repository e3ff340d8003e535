use serde_derive::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Field of a secret that can be named in an update mask. The kind is deliberately absent.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SecretField {
    Name,
    Metadata,
    Data,
}

impl Display for SecretField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SecretField::Name => "name",
            SecretField::Metadata => "metadata",
            SecretField::Data => "data",
        })
    }
}
