mod auth;
mod secret_edit;
mod secrets;
mod users;

pub use self::{
    auth::AuthService,
    secret_edit::{PayloadPatch, SecretEdit},
    secrets::{SecretSummary, SecretsService},
    users::UsersService,
};

#[cfg(test)]
pub mod tests {
    use crate::{
        errors::RequestError,
        repo::{AuthRepository, SecretsRepository, UsersRepository},
    };
    use keeper_types::{
        Code, CreateSecretRequest, GetSecretResponse, SecretField, SecretInfo, UpdateSecretRequest,
    };
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockState {
        pub users: Vec<(String, String)>,
        pub secrets: Vec<(SecretInfo, Vec<u8>)>,
        pub updates: Vec<UpdateSecretRequest>,
        pub gets: usize,
    }

    /// In-memory keeper that checks tokens the same way the real one does.
    #[derive(Clone, Default)]
    pub struct MockKeeper {
        pub state: Arc<Mutex<MockState>>,
    }

    fn not_found() -> anyhow::Error {
        RequestError {
            code: Code::NotFound,
            message: "secret not found".to_string(),
            violations: vec![],
        }
        .into()
    }

    impl MockKeeper {
        pub fn token(username: &str) -> String {
            format!("token-{username}")
        }
    }

    impl AuthRepository for MockKeeper {
        async fn login(&self, username: &str, security_key: &str) -> anyhow::Result<String> {
            let state = self.state.lock().unwrap();
            if state
                .users
                .iter()
                .any(|(name, key)| name == username && key == security_key)
            {
                Ok(Self::token(username))
            } else {
                Err(RequestError {
                    code: Code::Unauthenticated,
                    message: "invalid credentials".to_string(),
                    violations: vec![],
                }
                .into())
            }
        }
    }

    impl UsersRepository for MockKeeper {
        async fn register(&self, username: &str, security_key: &str) -> anyhow::Result<String> {
            let mut state = self.state.lock().unwrap();
            if state.users.iter().any(|(name, _)| name == username) {
                return Err(RequestError {
                    code: Code::AlreadyExists,
                    message: "user already exists".to_string(),
                    violations: vec![],
                }
                .into());
            }

            state
                .users
                .push((username.to_string(), security_key.to_string()));
            Ok(Self::token(username))
        }
    }

    impl SecretsRepository for MockKeeper {
        async fn create(&self, _: &str, request: CreateSecretRequest) -> anyhow::Result<Uuid> {
            let id = Uuid::new_v4();
            self.state.lock().unwrap().secrets.push((
                SecretInfo {
                    id,
                    name: request.name,
                    kind: request.kind,
                    metadata: request.metadata,
                },
                request.data,
            ));
            Ok(id)
        }

        async fn list(&self, _: &str) -> anyhow::Result<Vec<SecretInfo>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .secrets
                .iter()
                .map(|(info, _)| info.clone())
                .collect())
        }

        async fn get(&self, _: &str, id: Uuid) -> anyhow::Result<GetSecretResponse> {
            let mut state = self.state.lock().unwrap();
            state.gets += 1;
            state
                .secrets
                .iter()
                .find(|(info, _)| info.id == id)
                .map(|(info, data)| GetSecretResponse {
                    secret: info.clone(),
                    data: data.clone(),
                })
                .ok_or_else(not_found)
        }

        async fn update(&self, _: &str, request: UpdateSecretRequest) -> anyhow::Result<()> {
            let mut state = self.state.lock().unwrap();
            state.updates.push(request.clone());

            let (info, data) = state
                .secrets
                .iter_mut()
                .find(|(info, _)| info.id.to_string() == request.id)
                .ok_or_else(not_found)?;
            for field in &request.update_mask {
                match field {
                    SecretField::Name => info.name = request.name.clone(),
                    SecretField::Metadata => info.metadata = request.metadata.clone(),
                    SecretField::Data => *data = request.data.clone(),
                }
            }

            Ok(())
        }

        async fn delete(&self, _: &str, id: Uuid) -> anyhow::Result<()> {
            let mut state = self.state.lock().unwrap();
            let len = state.secrets.len();
            state.secrets.retain(|(info, _)| info.id != id);
            if state.secrets.len() == len {
                return Err(not_found());
            }
            Ok(())
        }
    }
}
