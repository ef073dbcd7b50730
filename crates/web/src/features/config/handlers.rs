use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::config::{ConfigResponse, UpdateConfigRequest},
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/config",
    responses(
        (status = 200, description = "Current configuration", body = ConfigResponse),
        (status = 409, description = "Competition not configured yet")
    ),
    tag = "config"
)]
pub async fn get_config(State(db): State<Database>) -> Result<Response, WebError> {
    let config = services::get_config(db.pool()).await?;

    Ok(Json(ConfigResponse::from(config)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/config",
    request_body = UpdateConfigRequest,
    responses(
        (status = 200, description = "Configuration updated", body = ConfigResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Competition not configured yet")
    ),
    tag = "config"
)]
pub async fn update_config(
    State(db): State<Database>,
    Json(req): Json<UpdateConfigRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let config = services::update_config(db.pool(), &req).await?;

    Ok(Json(ConfigResponse::from(config)).into_response())
}
