use crate::{
    error::Error,
    server::{
        app_state::AppState,
        handlers::rpc_error,
        validators::{validate_create_secret, validate_secret_id, validate_update_secret},
    },
    users::{User, secrets::SecretUpdate},
};
use actix_web::{HttpResponse, web};
use keeper_types::{
    CreateSecretRequest, CreateSecretResponse, DeleteSecretRequest, Empty, GetSecretRequest,
    GetSecretResponse, ListSecretsResponse, UpdateSecretRequest,
};

/// Secrets.Create
pub async fn secrets_create(
    state: web::Data<AppState>,
    user: User,
    body: web::Json<CreateSecretRequest>,
) -> Result<HttpResponse, Error> {
    validate_create_secret(&body)?;

    let CreateSecretRequest {
        name,
        kind,
        metadata,
        data,
    } = body.into_inner();
    let id = state
        .api
        .secrets(&user)
        .create_secret(name, kind, metadata, data)
        .await
        .map_err(rpc_error)?;

    Ok(HttpResponse::Ok().json(CreateSecretResponse { id }))
}

/// Secrets.List, the request body carries nothing and is ignored.
pub async fn secrets_list(state: web::Data<AppState>, user: User) -> Result<HttpResponse, Error> {
    let secrets = state
        .api
        .secrets(&user)
        .list_secrets()
        .await
        .map_err(rpc_error)?;

    Ok(HttpResponse::Ok().json(ListSecretsResponse {
        secrets: secrets.iter().map(|secret| secret.info()).collect(),
    }))
}

/// Secrets.Get
pub async fn secrets_get(
    state: web::Data<AppState>,
    user: User,
    body: web::Json<GetSecretRequest>,
) -> Result<HttpResponse, Error> {
    let id = validate_secret_id(&body.id)?;

    let secret = state
        .api
        .secrets(&user)
        .get_secret(id)
        .await
        .map_err(rpc_error)?;

    Ok(HttpResponse::Ok().json(GetSecretResponse {
        secret: secret.info(),
        data: secret.data.unwrap_or_default(),
    }))
}

/// Secrets.Update
pub async fn secrets_update(
    state: web::Data<AppState>,
    user: User,
    body: web::Json<UpdateSecretRequest>,
) -> Result<HttpResponse, Error> {
    let id = validate_update_secret(&body)?;

    let UpdateSecretRequest {
        update_mask,
        name,
        metadata,
        data,
        ..
    } = body.into_inner();
    let update = SecretUpdate::from_mask(&update_mask, name, metadata, data)
        .map_err(|err| rpc_error(err.into()))?;
    state
        .api
        .secrets(&user)
        .update_secret(id, &update)
        .await
        .map_err(rpc_error)?;

    Ok(HttpResponse::Ok().json(Empty {}))
}

/// Secrets.Delete
pub async fn secrets_delete(
    state: web::Data<AppState>,
    user: User,
    body: web::Json<DeleteSecretRequest>,
) -> Result<HttpResponse, Error> {
    let id = validate_secret_id(&body.id)?;

    state
        .api
        .secrets(&user)
        .delete_secret(id)
        .await
        .map_err(rpc_error)?;

    Ok(HttpResponse::Ok().json(Empty {}))
}
