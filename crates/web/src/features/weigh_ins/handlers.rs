use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::weigh_in::{
        CreateWeighInRequest, PreviewParams, RecordedWeighIn, WeighInPreviewResponse,
        WeighInResponse,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::features::today;

use super::services;

#[utoipa::path(
    post,
    path = "/api/weigh-ins",
    request_body = CreateWeighInRequest,
    responses(
        (status = 201, description = "Weigh-in recorded (resubmitting a week replaces the value)", body = RecordedWeighIn),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Participant not found")
    ),
    tag = "weigh-ins"
)]
pub async fn create_weigh_in(
    State(db): State<Database>,
    Json(req): Json<CreateWeighInRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let recorded = services::record_weigh_in(db.pool(), &req, today()).await?;

    Ok((StatusCode::CREATED, Json(recorded)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/weigh-ins/user/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant id")
    ),
    responses(
        (status = 200, description = "All weigh-ins for the participant", body = Vec<WeighInResponse>),
        (status = 404, description = "Participant not found")
    ),
    tag = "weigh-ins"
)]
pub async fn get_user_weigh_ins(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let weigh_ins = services::list_for_user(db.pool(), id).await?;

    let response: Vec<WeighInResponse> =
        weigh_ins.into_iter().map(WeighInResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/weigh-ins/preview",
    params(PreviewParams),
    responses(
        (status = 200, description = "What the weigh-in would score, nothing persisted", body = WeighInPreviewResponse),
        (status = 404, description = "Participant not found")
    ),
    tag = "weigh-ins"
)]
pub async fn preview_weigh_in(
    State(db): State<Database>,
    Query(params): Query<PreviewParams>,
) -> Result<Response, WebError> {
    let preview = services::preview(db.pool(), &params, today()).await?;

    Ok(Json(preview).into_response())
}
