use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{create_weigh_in, get_user_weigh_ins, preview_weigh_in};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", post(create_weigh_in))
        .route("/preview", get(preview_weigh_in))
        .route("/user/:id", get(get_user_weigh_ins))
}
