use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::{
    error::QueryError,
    fields::{Field, Row, flag, optional_text, text},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollegeRecord {
    pub id: String,
    pub name: String,
    pub district: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub ownership: String,
    pub image_url: Option<String>,
    pub website: Option<String>,
    pub verified: bool,
    pub created_at: Option<String>,
}

impl CollegeRecord {
    /// Maps a raw row onto the stable field set. A row without an id is rejected.
    pub fn from_row(row: &Row) -> Result<Self, QueryError> {
        let id = optional_text(row, Field::Id)
            .ok_or_else(|| QueryError::Decode("row without an id".to_string()))?;

        Ok(Self {
            id,
            name: text(row, Field::Name),
            district: text(row, Field::District),
            kind: text(row, Field::Type),
            ownership: text(row, Field::Ownership),
            image_url: optional_text(row, Field::ImageUrl),
            website: optional_text(row, Field::Website),
            verified: flag(row, Field::Verified),
            created_at: optional_text(row, Field::CreatedAt),
        })
    }
}

/// Maps every row or fails as a whole. Later rows repeating an id are dropped.
pub fn records_from_rows(rows: &[Row]) -> Result<Vec<CollegeRecord>, QueryError> {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let record = CollegeRecord::from_row(row)?;

        if !seen.insert(record.id.clone()) {
            warn!(id = %record.id, "Dropping duplicate college id");
            continue;
        }

        records.push(record);
    }

    Ok(records)
}
