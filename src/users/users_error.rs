/// Errors of the user registration and login flows.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum UsersError {
    #[error("user already exists")]
    UserExists,
    /// Unknown user and wrong security key are deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,
}
