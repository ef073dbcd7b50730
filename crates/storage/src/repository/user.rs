use rust_decimal::Decimal;
use serde_json::json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::User;
use crate::repository::audit::log_change;
use crate::repository::row::{self, UserRow};

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All participants, ordered by name.
    pub async fn list(&self) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT user_id, name, start_weight, created_at
            FROM users
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        row::collect(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User> {
        let user: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT user_id, name, start_weight, created_at
            FROM users
            WHERE user_id = ?
            "#,
        )
        .bind(row::encode_uuid(id))
        .fetch_optional(self.pool)
        .await?;

        user.ok_or(StorageError::NotFound)?.try_into()
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Create a participant; the creation is audit-logged in the same
    /// transaction.
    pub async fn create(&self, name: &str, start_weight: Decimal, changed_by: &str) -> Result<User> {
        if start_weight <= Decimal::ZERO {
            return Err(StorageError::InvalidWeight(start_weight));
        }

        let user_id = Uuid::new_v4();

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (user_id, name, start_weight)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(row::encode_uuid(user_id))
        .bind(name)
        .bind(row::encode_weight(start_weight))
        .execute(&mut *tx)
        .await
        .map_err(StorageError::from);

        if let Err(e) = inserted {
            return Err(if e.is_unique_violation() {
                StorageError::ConstraintViolation(format!("participant '{name}' already exists"))
            } else {
                e
            });
        }

        log_change(
            &mut tx,
            "user",
            &row::encode_uuid(user_id),
            None,
            Some(&json!({ "name": name, "start_weight": start_weight })),
            changed_by,
        )
        .await?;

        tx.commit().await?;

        self.find_by_id(user_id).await
    }

    /// Update name and/or start weight, keeping the before/after images in
    /// the audit log.
    pub async fn update(
        &self,
        existing: &User,
        name: Option<&str>,
        start_weight: Option<Decimal>,
        changed_by: &str,
    ) -> Result<User> {
        if let Some(weight) = start_weight
            && weight <= Decimal::ZERO
        {
            return Err(StorageError::InvalidWeight(weight));
        }

        let new_name = name.unwrap_or(&existing.name);
        let new_weight = start_weight.unwrap_or(existing.start_weight);

        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE users SET name = ?, start_weight = ? WHERE user_id = ?
            "#,
        )
        .bind(new_name)
        .bind(row::encode_weight(new_weight))
        .bind(row::encode_uuid(existing.user_id))
        .execute(&mut *tx)
        .await
        .map_err(StorageError::from);

        if let Err(e) = updated {
            return Err(if e.is_unique_violation() {
                StorageError::ConstraintViolation(format!("participant '{new_name}' already exists"))
            } else {
                e
            });
        }

        log_change(
            &mut tx,
            "user",
            &row::encode_uuid(existing.user_id),
            Some(&json!({ "name": existing.name, "start_weight": existing.start_weight })),
            Some(&json!({ "name": new_name, "start_weight": new_weight })),
            changed_by,
        )
        .await?;

        tx.commit().await?;

        self.find_by_id(existing.user_id).await
    }
}
