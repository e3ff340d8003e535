pub mod api_ext;
mod database_ext;
pub mod secrets;
mod user;
mod user_id;
mod users_error;

pub use self::{user::User, user_id::UserId, users_error::UsersError};
