use crate::api::Api;

/// State shared by all workers of the server.
pub struct AppState {
    pub api: Api,
}

impl AppState {
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}
