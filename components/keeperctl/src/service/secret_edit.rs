use crate::{errors::ClientError, payload::SecretPayload};
use keeper_types::SecretKind;

/// Requested changes of an existing secret. Empty values mean "leave unchanged".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Clears the description, takes precedence over `description`.
    pub no_description: bool,
    pub payload: PayloadPatch,
}

/// Changes of the payload of a specific kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadPatch {
    Binary {
        data: Option<Vec<u8>>,
    },
    Card {
        number: Option<String>,
        expiration: Option<String>,
        holder: Option<String>,
        cvv: Option<u32>,
    },
    Credentials {
        login: Option<String>,
        password: Option<String>,
    },
    Text {
        text: Option<String>,
    },
}

fn provided<T: AsRef<[u8]>>(value: &Option<T>) -> bool {
    value.as_ref().is_some_and(|value| !value.as_ref().is_empty())
}

fn overwrite<T: AsRef<[u8]>>(target: &mut T, value: Option<T>) {
    if let Some(value) = value.filter(|value| !value.as_ref().is_empty()) {
        *target = value;
    }
}

impl PayloadPatch {
    /// Kind of the secret the patch can be applied to.
    pub fn kind(&self) -> SecretKind {
        match self {
            PayloadPatch::Binary { .. } => SecretKind::Binary,
            PayloadPatch::Card { .. } => SecretKind::Card,
            PayloadPatch::Credentials { .. } => SecretKind::Credentials,
            PayloadPatch::Text { .. } => SecretKind::Text,
        }
    }

    /// Returns `true` if the patch doesn't change anything, so the stored payload can be left
    /// untouched.
    pub fn is_empty(&self) -> bool {
        match self {
            PayloadPatch::Binary { data } => !provided(data),
            PayloadPatch::Card {
                number,
                expiration,
                holder,
                cvv,
            } => {
                !provided(number) && !provided(expiration) && !provided(holder) && cvv.is_none()
            }
            PayloadPatch::Credentials { login, password } => {
                !provided(login) && !provided(password)
            }
            PayloadPatch::Text { text } => !provided(text),
        }
    }

    /// Overwrites the provided values of the payload. Fails if the payload is of another kind.
    pub fn apply(self, payload: SecretPayload) -> Result<SecretPayload, ClientError> {
        Ok(match (self, payload) {
            (PayloadPatch::Binary { data }, SecretPayload::Binary(mut binary)) => {
                overwrite(&mut binary.data, data);
                SecretPayload::Binary(binary)
            }
            (
                PayloadPatch::Card {
                    number,
                    expiration,
                    holder,
                    cvv,
                },
                SecretPayload::Card(mut card),
            ) => {
                overwrite(&mut card.number, number);
                overwrite(&mut card.expiration, expiration);
                overwrite(&mut card.holder, holder);
                if let Some(cvv) = cvv {
                    card.cvv = cvv;
                }
                SecretPayload::Card(card)
            }
            (
                PayloadPatch::Credentials { login, password },
                SecretPayload::Credentials(mut creds),
            ) => {
                overwrite(&mut creds.login, login);
                overwrite(&mut creds.password, password);
                SecretPayload::Credentials(creds)
            }
            (PayloadPatch::Text { text }, SecretPayload::Text(mut payload)) => {
                overwrite(&mut payload.text, text);
                SecretPayload::Text(payload)
            }
            (patch, payload) => {
                return Err(ClientError::KindMismatch {
                    expected: patch.kind(),
                    actual: payload.kind(),
                });
            }
        })
    }
}
