use crate::{
    config::Config,
    database::Database,
    security::api_ext::SecurityApiExt,
    users::{User, api_ext::UsersApiExt, secrets::api_ext::SecretsApiExt},
};

/// Entry point to the server business logic, shared by all request handlers.
#[derive(Clone)]
pub struct Api {
    pub db: Database,
    pub config: Config,
}

impl Api {
    /// Instantiates APIs collection with the specified config and database.
    pub fn new(config: Config, db: Database) -> Self {
        Self { config, db }
    }

    /// Returns an API to work with the user accounts.
    pub fn users(&self) -> UsersApiExt<'_> {
        UsersApiExt::new(self)
    }

    /// Returns an API to authenticate users.
    pub fn security(&self) -> SecurityApiExt<'_> {
        SecurityApiExt::new(self)
    }

    /// Returns an API to work with the secrets owned by the specified user.
    pub fn secrets<'a>(&'a self, user: &'a User) -> SecretsApiExt<'a> {
        SecretsApiExt::new(self, user)
    }
}
