use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::audit::AuditQuery,
    models::AuditEntry,
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/audit",
    params(AuditQuery),
    responses(
        (status = 200, description = "Audit log entries, most recent first", body = Vec<AuditEntry>)
    ),
    tag = "audit"
)]
pub async fn get_audit_log(
    State(db): State<Database>,
    Query(query): Query<AuditQuery>,
) -> Result<Response, WebError> {
    let entries = services::list_entries(db.pool(), &query).await?;

    Ok(Json(entries).into_response())
}
