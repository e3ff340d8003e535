use serde::{Deserialize, Serialize};
use serde_with::{TimestampSeconds, serde_as};
use time::OffsetDateTime;
use uuid::Uuid;

/// JWT claims struct.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Claims {
    /// Token issuer, always the same for the tokens this server issues.
    pub iss: String,
    /// Unique token id.
    pub jti: Uuid,
    /// Token issue time (UTC timestamp).
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub iat: OffsetDateTime,
    /// Token isn't valid before this time (UTC timestamp).
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub nbf: OffsetDateTime,
    /// Token expiration time (UTC timestamp).
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub exp: OffsetDateTime,
    /// User id.
    pub sub: String,
    /// Username of the user the token is issued for.
    pub username: String,
}

#[cfg(test)]
mod test {
    use crate::security::Claims;
    use insta::assert_json_snapshot;
    use time::OffsetDateTime;
    use uuid::uuid;

    #[test]
    fn serialization() -> anyhow::Result<()> {
        let claims = Claims {
            iss: "Keeper".to_string(),
            jti: uuid!("00000000-0000-0000-0000-000000000002"),
            // January 1, 2010 11:00:00
            iat: OffsetDateTime::from_unix_timestamp(1262340000)?,
            nbf: OffsetDateTime::from_unix_timestamp(1262340000)?,
            exp: OffsetDateTime::from_unix_timestamp(1262340900)?,
            sub: "00000000-0000-0000-0000-000000000001".to_string(),
            username: "admin".to_string(),
        };
        assert_json_snapshot!(claims, @r###"
        {
          "iss": "Keeper",
          "jti": "00000000-0000-0000-0000-000000000002",
          "iat": 1262340000,
          "nbf": 1262340000,
          "exp": 1262340900,
          "sub": "00000000-0000-0000-0000-000000000001",
          "username": "admin"
        }
        "###);

        assert_eq!(
            serde_json::from_str::<Claims>(&serde_json::to_string(&claims)?)?,
            claims
        );

        Ok(())
    }
}
