use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::setup::{DemoSeedResponse, SetupRequest, SetupResponse, SetupStatusResponse},
};
use validator::Validate;

use crate::error::WebError;
use crate::features::today;

use super::services;

#[utoipa::path(
    get,
    path = "/api/setup/status",
    responses(
        (status = 200, description = "Whether the initial setup has been completed", body = SetupStatusResponse)
    ),
    tag = "setup"
)]
pub async fn get_setup_status(State(db): State<Database>) -> Result<Response, WebError> {
    let status = services::setup_status(db.pool()).await?;

    Ok(Json(status).into_response())
}

#[utoipa::path(
    post,
    path = "/api/setup",
    request_body = SetupRequest,
    responses(
        (status = 201, description = "Setup completed", body = SetupResponse),
        (status = 400, description = "Validation error or setup already completed")
    ),
    tag = "setup"
)]
pub async fn complete_setup(
    State(db): State<Database>,
    Json(req): Json<SetupRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let status = services::setup_status(db.pool()).await?;
    if status.setup_complete {
        return Err(WebError::BadRequest(
            "Setup has already been completed".to_string(),
        ));
    }

    let setup = services::complete_setup(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(setup)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/setup/demo",
    responses(
        (status = 201, description = "Demo data loaded", body = DemoSeedResponse),
        (status = 400, description = "Setup already completed")
    ),
    tag = "setup"
)]
pub async fn load_demo_data(State(db): State<Database>) -> Result<Response, WebError> {
    let status = services::setup_status(db.pool()).await?;
    if status.setup_complete {
        return Err(WebError::BadRequest(
            "Setup has already been completed".to_string(),
        ));
    }

    let seeded = services::seed_demo(db.pool(), today()).await?;

    Ok((StatusCode::CREATED, Json(seeded)).into_response())
}
