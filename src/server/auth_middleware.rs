use crate::{error::Error, security::AccessToken, server::app_state::AppState};
use actix_web::{
    HttpMessage,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
    middleware::Next,
    web,
};
use anyhow::anyhow;
use keeper_types::{AUTH_LOGIN, USERS_REGISTER};
use tracing::{error, warn};

/// Methods that can be called without an access token.
const ANONYMOUS_METHODS: [&str; 2] = [AUTH_LOGIN, USERS_REGISTER];

/// Authenticates every call except the anonymous ones, and makes the caller identity available to
/// the handlers through the `User` extractor.
pub async fn authenticate(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    if ANONYMOUS_METHODS.contains(&req.path()) {
        return next.call(req).await;
    }

    let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
        return Err(Error::internal(anyhow!("Application state is not configured.")).into());
    };

    let Some(token) = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(AccessToken::from_header_value)
    else {
        warn!(rpc.method = req.path(), "Rejected call without access token.");
        return Err(Error::unauthenticated().into());
    };

    match state.api.security().authenticate(&token) {
        Ok(Some(user)) => {
            req.extensions_mut().insert(user);
            next.call(req).await
        }
        Ok(None) => {
            warn!(rpc.method = req.path(), "Rejected call with invalid access token.");
            Err(Error::unauthenticated().into())
        }
        Err(err) => {
            error!(rpc.method = req.path(), "Failed to authenticate call: {err:?}");
            Err(Error::internal(err).into())
        }
    }
}
