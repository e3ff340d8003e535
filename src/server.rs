mod app_state;
mod auth_middleware;
mod extractors;
mod handlers;
mod validators;

use crate::{
    api::Api, config::Config, database::Database, error::Error, logging::RpcRootSpanBuilder,
};
use actix_web::{
    App, HttpServer,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::from_fn,
    web,
};
use anyhow::Context;
use keeper_types::{
    AUTH_LOGIN, SECRETS_CREATE, SECRETS_DELETE, SECRETS_GET, SECRETS_LIST, SECRETS_UPDATE,
    USERS_REGISTER,
};
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use self::app_state::AppState;

/// Time given to the in-flight calls to complete once the shutdown signal is received.
const SHUTDOWN_TIMEOUT_SECS: u64 = 60;

/// Builds the application with all RPC methods, the authentication middleware and the request
/// logging.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(
            web::JsonConfig::default()
                .limit(validators::MAX_MESSAGE_SIZE)
                .error_handler(|err, _| {
                    Error::malformed_request(format!("malformed request: {err}")).into()
                }),
        )
        .wrap(from_fn(auth_middleware::authenticate))
        .wrap(TracingLogger::<RpcRootSpanBuilder>::new())
        .route(AUTH_LOGIN, web::post().to(handlers::auth_login))
        .route(USERS_REGISTER, web::post().to(handlers::users_register))
        .route(SECRETS_CREATE, web::post().to(handlers::secrets_create))
        .route(SECRETS_LIST, web::post().to(handlers::secrets_list))
        .route(SECRETS_GET, web::post().to(handlers::secrets_get))
        .route(SECRETS_UPDATE, web::post().to(handlers::secrets_update))
        .route(SECRETS_DELETE, web::post().to(handlers::secrets_delete))
}

#[actix_web::main]
pub async fn run(config: Config) -> Result<(), anyhow::Error> {
    let db = Database::open(&config.db).await?;
    let state = web::Data::new(AppState::new(Api::new(config.clone(), db)));

    let mut tls = SslAcceptor::mozilla_intermediate(SslMethod::tls())?;
    tls.set_private_key_file(&config.tls.key_path, SslFiletype::PEM)
        .with_context(|| format!("Failed to load TLS key {}.", config.tls.key_path.display()))?;
    tls.set_certificate_chain_file(&config.tls.certificate_path)
        .with_context(|| {
            format!(
                "Failed to load TLS certificate {}.",
                config.tls.certificate_path.display()
            )
        })?;

    let http_server = HttpServer::new(move || create_app(state.clone()))
        .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
        .bind_openssl(&config.address, tls)
        .with_context(|| format!("Failed to bind to {}.", &config.address))?;

    info!("keeperd is available at https://{}", config.address);

    http_server
        .run()
        .await
        .with_context(|| "Failed to run keeperd.")
}
