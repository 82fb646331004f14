use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    CollegeRecord, CollegeSource,
    error::{FetchError, QueryError},
    fields::{Field, Row, keys, lookup},
    record::records_from_rows,
    store::error_message,
};

/// A directory endpoint answering `{ success, data, count }`.
pub struct RemoteDirectory {
    client: Client,
    url: Url,
}

impl RemoteDirectory {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }
}

pub async fn get_remote_colleges(
    client: &Client,
    url: Url,
) -> Result<Vec<CollegeRecord>, QueryError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(QueryError::Rejected {
            status,
            message: error_message(&body, &["message", "error", "details"]),
        });
    }

    let json: Value = serde_json::from_str(&body).map_err(|e| QueryError::Decode(e.to_string()))?;

    let mut rows: Vec<Row> = match json.get("data") {
        None | Some(Value::Null) => Vec::new(),
        Some(data) => serde_json::from_value(data.clone())
            .map_err(|e| QueryError::Decode(format!("data: {e}")))?,
    };

    // The endpoint only serves verified rows, an absent flag means it was stripped
    let (verified_key, _) = keys(Field::Verified);
    for row in &mut rows {
        if lookup(row, Field::Verified).is_none() {
            row.insert(verified_key.to_string(), Value::Bool(true));
        }
    }

    let mut records = records_from_rows(&rows)?;
    records.retain(|record| {
        if !record.verified {
            warn!(id = %record.id, "Remote directory returned an unverified college, dropping it");
        }
        record.verified
    });

    Ok(records)
}

#[async_trait]
impl CollegeSource for RemoteDirectory {
    async fn fetch_verified_colleges(&self) -> Result<Vec<CollegeRecord>, FetchError> {
        let records = get_remote_colleges(&self.client, self.url.clone()).await?;
        info!(count = records.len(), url = %self.url, "Fetched remote directory");

        Ok(records)
    }
}
