use crate::users::secrets::SecretsError;
use keeper_types::SecretField;

/// Partial update of a secret. A `None` field is left untouched, a `Some` field is written even if
/// empty. The kind can't be updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretUpdate {
    pub name: Option<String>,
    pub metadata: Option<Vec<u8>>,
    pub data: Option<Vec<u8>>,
}

impl SecretUpdate {
    /// Picks the values named in the field mask. An empty mask is rejected.
    pub fn from_mask(
        mask: &[SecretField],
        name: String,
        metadata: Vec<u8>,
        data: Vec<u8>,
    ) -> Result<Self, SecretsError> {
        if mask.is_empty() {
            return Err(SecretsError::NoValuesToUpdate);
        }

        Ok(Self {
            name: mask.contains(&SecretField::Name).then_some(name),
            metadata: mask.contains(&SecretField::Metadata).then_some(metadata),
            data: mask.contains(&SecretField::Data).then_some(data),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.metadata.is_none() && self.data.is_none()
    }
}

#[cfg(test)]
mod tests {
    use crate::users::secrets::{SecretUpdate, SecretsError};
    use keeper_types::SecretField;

    #[test]
    fn picks_only_masked_fields() {
        let update = SecretUpdate::from_mask(
            &[SecretField::Data],
            "name".to_string(),
            b"metadata".to_vec(),
            b"data".to_vec(),
        );
        assert_eq!(
            update,
            Ok(SecretUpdate {
                name: None,
                metadata: None,
                data: Some(b"data".to_vec()),
            })
        );

        let update = SecretUpdate::from_mask(
            &[SecretField::Metadata, SecretField::Name],
            "".to_string(),
            vec![],
            b"data".to_vec(),
        );
        assert_eq!(
            update,
            Ok(SecretUpdate {
                name: Some("".to_string()),
                metadata: Some(vec![]),
                data: None,
            })
        );
    }

    #[test]
    fn rejects_empty_mask() {
        assert_eq!(
            SecretUpdate::from_mask(&[], "name".to_string(), vec![1], vec![2]),
            Err(SecretsError::NoValuesToUpdate)
        );
        assert!(SecretUpdate::default().is_empty());
    }
}
