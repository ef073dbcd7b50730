//! Raw row types and the SQLite column mapping for domain values.
//!
//! SQLite has no decimal or uuid column type, so weights are stored as TEXT
//! (exact round-trip into [`Decimal`]) and identifiers as hyphenated TEXT.
//! Everything crossing that boundary goes through this module.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{AuditEntry, PotContribution, User, WeighIn};

pub(crate) fn encode_uuid(id: Uuid) -> String {
    id.to_string()
}

pub(crate) fn decode_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| StorageError::ConstraintViolation(format!("invalid stored uuid: {raw}")))
}

pub(crate) fn encode_weight(weight: Decimal) -> String {
    weight.normalize().to_string()
}

pub(crate) fn decode_weight(raw: &str) -> Result<Decimal> {
    raw.parse()
        .map_err(|_| StorageError::ConstraintViolation(format!("invalid stored weight: {raw}")))
}

#[derive(FromRow)]
pub(crate) struct UserRow {
    pub user_id: String,
    pub name: String,
    pub start_weight: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<UserRow> for User {
    type Error = StorageError;

    fn try_from(row: UserRow) -> Result<User> {
        Ok(User {
            user_id: decode_uuid(&row.user_id)?,
            name: row.name,
            start_weight: decode_weight(&row.start_weight)?,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
pub(crate) struct WeighInRow {
    pub user_id: String,
    pub week_start: NaiveDate,
    pub weight: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<WeighInRow> for WeighIn {
    type Error = StorageError;

    fn try_from(row: WeighInRow) -> Result<WeighIn> {
        Ok(WeighIn {
            user_id: decode_uuid(&row.user_id)?,
            week_start: row.week_start,
            weight: decode_weight(&row.weight)?,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
pub(crate) struct PotContributionRow {
    pub week_start: NaiveDate,
    pub user_id: String,
    pub amount: i64,
    pub created_at: NaiveDateTime,
}

impl TryFrom<PotContributionRow> for PotContribution {
    type Error = StorageError;

    fn try_from(row: PotContributionRow) -> Result<PotContribution> {
        Ok(PotContribution {
            week_start: row.week_start,
            user_id: decode_uuid(&row.user_id)?,
            amount: row.amount,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
pub(crate) struct AuditRow {
    pub id: i64,
    pub entity: String,
    pub entity_id: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: String,
    pub changed_at: NaiveDateTime,
}

impl TryFrom<AuditRow> for AuditEntry {
    type Error = StorageError;

    fn try_from(row: AuditRow) -> Result<AuditEntry> {
        Ok(AuditEntry {
            id: row.id,
            entity: row.entity,
            entity_id: row.entity_id,
            old_value: decode_json(row.old_value)?,
            new_value: decode_json(row.new_value)?,
            changed_by: row.changed_by,
            changed_at: row.changed_at,
        })
    }
}

fn decode_json(raw: Option<String>) -> Result<Option<serde_json::Value>> {
    raw.map(|s| {
        serde_json::from_str(&s)
            .map_err(|_| StorageError::ConstraintViolation("invalid audit payload".to_string()))
    })
    .transpose()
}

pub(crate) fn collect<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = StorageError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_round_trips_exactly() {
        let weight: Decimal = "98.5".parse().unwrap();
        assert_eq!(decode_weight(&encode_weight(weight)).unwrap(), weight);
    }

    #[test]
    fn encode_weight_normalizes_trailing_zeros() {
        let weight: Decimal = "80.500".parse().unwrap();
        assert_eq!(encode_weight(weight), "80.5");
    }

    #[test]
    fn garbage_weight_is_rejected() {
        assert!(decode_weight("not-a-number").is_err());
    }
}
