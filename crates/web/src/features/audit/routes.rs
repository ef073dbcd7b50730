use axum::{Router, routing::get};
use storage::Database;

use super::handlers::get_audit_log;

pub fn routes() -> Router<Database> {
    Router::new().route("/", get(get_audit_log))
}
