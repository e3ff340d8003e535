use serde_derive::{Deserialize, Serialize};

/// Body of the `Auth.Login` and `Users.Register` calls.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CredentialsRequest {
    pub username: String,
    /// Hex fingerprint of the client-side encryption key, never the key itself.
    pub security_key: String,
}

/// Response of the calls that issue an access token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenResponse {
    pub access_token: String,
}
