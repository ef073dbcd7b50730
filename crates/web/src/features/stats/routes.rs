use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{
    get_leaderboard, get_overview, get_pot, get_prognosis, get_progress, get_user_stats,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/overview", get(get_overview))
        .route("/leaderboard", get(get_leaderboard))
        .route("/user/:id", get(get_user_stats))
        .route("/pot", get(get_pot))
        .route("/prognosis", get(get_prognosis))
        .route("/progress", get(get_progress))
}
