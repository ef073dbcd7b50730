use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{complete_setup, get_setup_status, load_demo_data};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", post(complete_setup))
        .route("/status", get(get_setup_status))
        .route("/demo", post(load_demo_data))
}
