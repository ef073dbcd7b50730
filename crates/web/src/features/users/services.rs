use sqlx::SqlitePool;
use storage::{
    dto::user::{CreateUserRequest, UpdateUserRequest},
    error::Result,
    models::User,
    repository::user::UserRepository,
    services::pot,
};
use uuid::Uuid;

/// List all participants
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let repo = UserRepository::new(pool);
    repo.list().await
}

/// Get participant by id
pub async fn get_user(pool: &SqlitePool, id: Uuid) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new participant
pub async fn create_user(pool: &SqlitePool, request: &CreateUserRequest) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.create(&request.name, request.start_weight, "system").await
}

/// Update a participant. A changed start weight shifts first-week percent
/// changes, so the pot is re-settled afterwards.
pub async fn update_user(
    pool: &SqlitePool,
    id: Uuid,
    request: &UpdateUserRequest,
) -> Result<User> {
    let repo = UserRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    let updated = repo
        .update(
            &existing,
            request.name.as_deref(),
            request.start_weight,
            "system",
        )
        .await?;

    pot::resettle(pool, "system").await?;

    Ok(updated)
}
