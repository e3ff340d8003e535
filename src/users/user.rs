use crate::users::UserId;
use serde_derive::Serialize;

/// Authenticated user identity, the only thing the request handlers know about the caller.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
}
