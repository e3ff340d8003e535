use crate::{
    error::Error,
    server::{app_state::AppState, handlers::rpc_error, validators::validate_credentials},
};
use actix_web::{HttpResponse, web};
use keeper_types::{AccessTokenResponse, CredentialsRequest};

/// Auth.Login
pub async fn auth_login(
    state: web::Data<AppState>,
    body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, Error> {
    validate_credentials(&body)?;

    let token = state
        .api
        .security()
        .login(&body.username, &body.security_key)
        .await
        .map_err(rpc_error)?;

    Ok(HttpResponse::Ok().json(AccessTokenResponse {
        access_token: token.into_inner(),
    }))
}
