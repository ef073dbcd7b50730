use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use storage::{Database, dto::week::WeekViewResponse};

use crate::error::WebError;
use crate::features::today;

use super::services;

#[utoipa::path(
    get,
    path = "/api/weeks/current",
    responses(
        (status = 200, description = "The current scoring week", body = WeekViewResponse),
        (status = 409, description = "Competition not configured yet")
    ),
    tag = "weeks"
)]
pub async fn get_current_week(State(db): State<Database>) -> Result<Response, WebError> {
    let view = services::week_view(db.pool(), today()).await?;

    Ok(Json(view).into_response())
}

#[utoipa::path(
    get,
    path = "/api/weeks/{date}",
    params(
        ("date" = NaiveDate, Path, description = "Any date inside the week (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "The week containing the given date", body = WeekViewResponse),
        (status = 400, description = "Invalid date"),
        (status = 409, description = "Competition not configured yet")
    ),
    tag = "weeks"
)]
pub async fn get_week(
    State(db): State<Database>,
    Path(date): Path<String>,
) -> Result<Response, WebError> {
    let date: NaiveDate = date
        .parse()
        .map_err(|_| WebError::BadRequest("Invalid date format. Use YYYY-MM-DD".to_string()))?;

    let view = services::week_view(db.pool(), date).await?;

    Ok(Json(view).into_response())
}
