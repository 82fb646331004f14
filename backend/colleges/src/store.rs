//! # Supabase
//!
//! Managed Postgres behind PostgREST. Populated out of band by the moderation process, this
//! side only ever reads.
//!
//! ## Query
//! `GET /rest/v1/colleges?select=<columns>&verified=eq.true&order=created_at.desc`
//! with the anonymous key in both `apikey` and `Authorization: Bearer`.
//!
//! ## Client
//! - Built lazily on the first fetch, then reused for the life of the process
//! - Credentials are validated at that point, see [`crate::credentials`]
//! - A failed build is not cached, every call reports the configuration error again
//! - Each attempt is bounded by the configured timeout, timeouts and connect failures retry once
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::{
    CollegeRecord, CollegeSource,
    credentials::{self, Credentials},
    error::{ConfigurationError, FetchError, QueryError},
    fields::{Row, STORE_COLUMNS},
    record::records_from_rows,
};

pub const COLLEGES_TABLE: &str = "colleges";
const MAX_ATTEMPTS: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct StoreSettings {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub timeout: Duration,
}

struct StoreClient {
    http: Client,
    endpoint: Url,
    key: String,
}

pub struct SupabaseStore {
    settings: StoreSettings,
    client: OnceCell<StoreClient>,
}

impl SupabaseStore {
    pub fn new(settings: StoreSettings) -> Self {
        Self {
            settings,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&StoreClient, ConfigurationError> {
        self.client
            .get_or_try_init(|| async {
                let creds = credentials::resolve(
                    self.settings.url.as_deref(),
                    self.settings.anon_key.as_deref(),
                )?;

                let client = build_client(creds, self.settings.timeout)?;
                info!(endpoint = %client.endpoint, "Store client ready");

                Ok::<_, ConfigurationError>(client)
            })
            .await
    }

    async fn send(&self, client: &StoreClient) -> Result<Response, QueryError> {
        let mut attempt = 1;

        loop {
            let result = client
                .http
                .get(client.endpoint.clone())
                .query(&[
                    ("select", STORE_COLUMNS),
                    ("verified", "eq.true"),
                    ("order", "created_at.desc"),
                ])
                .header("apikey", &client.key)
                .bearer_auth(&client.key)
                .send()
                .await;

            match result {
                Err(e) if attempt < MAX_ATTEMPTS && (e.is_timeout() || e.is_connect()) => {
                    warn!(attempt, error = %e, "Store request failed, retrying");
                    attempt += 1;
                }
                other => return Ok(other?),
            }
        }
    }
}

fn build_client(creds: Credentials, timeout: Duration) -> Result<StoreClient, ConfigurationError> {
    let mut base = creds.url;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let endpoint = base
        .join(&format!("rest/v1/{COLLEGES_TABLE}"))
        .map_err(|_| ConfigurationError::InvalidUrl {
            value: credentials::mask(Some(base.as_str())),
        })?;

    let mut builder = Client::builder();
    if !timeout.is_zero() {
        builder = builder.timeout(timeout);
    }

    Ok(StoreClient {
        http: builder.build().map_err(ConfigurationError::Client)?,
        endpoint,
        key: creds.key,
    })
}

/// Pulls a readable message out of a PostgREST error body.
pub(crate) fn error_message(body: &str, keys: &[&str]) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            keys.iter().find_map(|key| match json.get(*key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                _ => None,
            })
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl CollegeSource for SupabaseStore {
    async fn fetch_verified_colleges(&self) -> Result<Vec<CollegeRecord>, FetchError> {
        let client = self.client().await?;
        let response = self.send(client).await?;

        let status = response.status();
        let body = response.text().await.map_err(QueryError::from)?;

        if !status.is_success() {
            return Err(QueryError::Rejected {
                status,
                message: error_message(&body, &["message", "details", "hint"]),
            }
            .into());
        }

        let rows: Vec<Row> =
            serde_json::from_str(&body).map_err(|e| QueryError::Decode(e.to_string()))?;

        let mut records = records_from_rows(&rows)?;
        records.retain(|record| {
            if !record.verified {
                warn!(id = %record.id, "Store returned an unverified college, dropping it");
            }
            record.verified
        });

        info!(count = records.len(), "Fetched verified colleges");

        Ok(records)
    }
}
