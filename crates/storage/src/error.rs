use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Not enough data: {0}")]
    InsufficientData(&'static str),

    #[error("Invalid weight: {0} kg")]
    InvalidWeight(Decimal),

    #[error("Competition has not been configured yet")]
    ConfigMissing,
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// SQLite extended result codes for UNIQUE / PRIMARY KEY constraint hits.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if matches!(e.code().as_deref(), Some("2067") | Some("1555"))
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("787")
        )
    }
}
