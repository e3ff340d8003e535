use crate::{security::Claims, users::User};
use anyhow::Context;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::fmt::{Debug, Formatter};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Issuer of every access token.
pub const ACCESS_TOKEN_ISSUER: &str = "Keeper";

/// Access tokens are valid for a fixed period after issuance and can't be revoked.
pub const ACCESS_TOKEN_LIFETIME: Duration = Duration::minutes(15);

const BEARER_PREFIX: &str = "Bearer ";

/// Signed, time-bounded token that proves a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Issues a token for the user, signed with the shared server secret.
    pub fn issue(user: &User, secret: &str) -> anyhow::Result<Self> {
        Self::issue_at(user, secret, OffsetDateTime::now_utc())
    }

    pub(crate) fn issue_at(
        user: &User,
        secret: &str,
        issued_at: OffsetDateTime,
    ) -> anyhow::Result<Self> {
        // Claims carry whole seconds.
        let issued_at = issued_at.replace_nanosecond(0)?;
        let claims = Claims {
            iss: ACCESS_TOKEN_ISSUER.to_string(),
            jti: Uuid::new_v4(),
            iat: issued_at,
            nbf: issued_at,
            exp: issued_at + ACCESS_TOKEN_LIFETIME,
            sub: user.id.to_string(),
            username: user.username.clone(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map(Self)
        .with_context(|| format!("Failed to sign access token for user ({}).", user.id))
    }

    /// Verifies the signature and time bounds and returns the claims.
    pub fn decode(&self, secret: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_issuer(&[ACCESS_TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "nbf", "iat", "iss", "sub"]);

        Ok(decode::<Claims>(
            &self.0,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?
        .claims)
    }

    /// Extracts the token from the `authorization` metadata value, with or without the
    /// `Bearer ` prefix.
    pub fn from_header_value(value: &str) -> Self {
        let value = value.trim();
        Self(value.strip_prefix(BEARER_PREFIX).unwrap_or(value).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(****)")
    }
}
