use axum::{
    Router,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{create_user, get_user, list_users, update_user};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_users))
        .route("/", post(create_user))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
}
