mod access_token;
pub mod api_ext;
mod jwt;
mod stored_credentials;

pub use self::{
    access_token::{ACCESS_TOKEN_ISSUER, ACCESS_TOKEN_LIFETIME, AccessToken},
    jwt::Claims,
    stored_credentials::StoredCredentials,
};
