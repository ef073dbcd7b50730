use axum::{
    Router,
    routing::{get, put},
};
use storage::Database;

use super::handlers::{get_config, update_config};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(get_config))
        .route("/", put(update_config))
}
