use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List all participants", body = Vec<UserResponse>)
    ),
    tag = "users"
)]
pub async fn list_users(State(db): State<Database>) -> Result<Response, WebError> {
    let users = services::list_users(db.pool()).await?;

    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant id")
    ),
    responses(
        (status = 200, description = "Participant found", body = UserResponse),
        (status = 404, description = "Participant not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let user = services::get_user(db.pool(), id).await?;

    Ok(Json(UserResponse::from(user)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Participant created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name already taken")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(db): State<Database>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::create_user(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant id")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Participant updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Participant not found")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_user(db.pool(), id, &req).await?;

    Ok(Json(UserResponse::from(updated)).into_response())
}
