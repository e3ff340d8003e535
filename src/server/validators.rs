use crate::error::Error;
use keeper_types::{
    CreateSecretRequest, CredentialsRequest, FieldViolation, SecretField, UpdateSecretRequest,
};
use uuid::Uuid;

pub const MAX_USERNAME_LENGTH: usize = 128;
pub const MAX_SECRET_NAME_LENGTH: usize = 256;
pub const MAX_METADATA_SIZE: usize = 2 * 1024 * 1024;
pub const MAX_DATA_SIZE: usize = 4 * 1024 * 1024;

/// Upper bound of a request body: the largest payload in base64 plus room for the other fields.
pub const MAX_MESSAGE_SIZE: usize = (MAX_METADATA_SIZE + MAX_DATA_SIZE) / 3 * 4 + 64 * 1024;

const REQUIRED: &str = "value is required";

#[derive(Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn add(&mut self, field: &str, description: impl Into<String>) {
        self.0.push(FieldViolation::new(field, description));
    }

    fn check_text(&mut self, field: &str, value: &str, max_length: usize) {
        if value.is_empty() {
            self.add(field, REQUIRED);
        } else if value.chars().count() > max_length {
            self.add(
                field,
                format!("value length must be at most {max_length} characters"),
            );
        }
    }

    fn check_bytes(&mut self, field: &str, value: &[u8], max_size: usize, required: bool) {
        if required && value.is_empty() {
            self.add(field, REQUIRED);
        } else if value.len() > max_size {
            self.add(field, format!("value size must be at most {max_size} bytes"));
        }
    }

    fn check_id(&mut self, value: &str) -> Option<Uuid> {
        if value.is_empty() {
            self.add("id", REQUIRED);
            return None;
        }

        match Uuid::parse_str(value) {
            Ok(id) => Some(id),
            Err(_) => {
                self.add("id", "value must be a valid UUID");
                None
            }
        }
    }

    fn into_result<T>(self, value: T) -> Result<T, Error> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(Error::invalid_argument(self.0))
        }
    }
}

pub fn validate_credentials(request: &CredentialsRequest) -> Result<(), Error> {
    let mut violations = Violations::default();
    violations.check_text("username", &request.username, MAX_USERNAME_LENGTH);
    if request.security_key.is_empty() {
        violations.add("security_key", REQUIRED);
    }
    violations.into_result(())
}

pub fn validate_create_secret(request: &CreateSecretRequest) -> Result<(), Error> {
    let mut violations = Violations::default();
    violations.check_text("name", &request.name, MAX_SECRET_NAME_LENGTH);
    violations.check_bytes("metadata", &request.metadata, MAX_METADATA_SIZE, false);
    violations.check_bytes("data", &request.data, MAX_DATA_SIZE, true);
    violations.into_result(())
}

pub fn validate_secret_id(id: &str) -> Result<Uuid, Error> {
    let mut violations = Violations::default();
    let id = violations.check_id(id);
    violations.into_result(id.unwrap_or_default())
}

pub fn validate_update_secret(request: &UpdateSecretRequest) -> Result<Uuid, Error> {
    let mut violations = Violations::default();
    let id = violations.check_id(&request.id);

    if request.update_mask.is_empty() {
        violations.add("update_mask", REQUIRED);
    }
    if request.update_mask.contains(&SecretField::Name) {
        violations.check_text("name", &request.name, MAX_SECRET_NAME_LENGTH);
    }
    violations.check_bytes("metadata", &request.metadata, MAX_METADATA_SIZE, false);
    violations.check_bytes(
        "data",
        &request.data,
        MAX_DATA_SIZE,
        request.update_mask.contains(&SecretField::Data),
    );

    violations.into_result(id.unwrap_or_default())
}
