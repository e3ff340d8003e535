use serde_derive::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// Secrets shorter than this are accepted, but reported at startup.
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Configuration of the access token signing.
#[derive(Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct SecurityConfig {
    /// Secret key used to sign and verify access tokens (HMAC-SHA256).
    pub jwt_secret: String,
}

impl Debug for SecurityConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field(
                "jwt_secret",
                &if self.jwt_secret.is_empty() { "" } else { "****" },
            )
            .finish()
    }
}
