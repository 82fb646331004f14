use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use colleges::{ConfigurationError, FetchError, QueryError};
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::error;

pub const MISCONFIGURED_MESSAGE: &str = "Store connection is not configured.";
pub const MISCONFIGURED_HINT: &str =
    "Set SUPABASE_URL and SUPABASE_ANON_KEY in the environment and restart the server.";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch colleges";

/// Full detail goes to the log. Clients only get it when `diagnostics` is on.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store connection is not configured: {source}")]
    Misconfigured {
        source: ConfigurationError,
        diagnostics: bool,
    },

    #[error("Failed to fetch colleges: {source}")]
    Query {
        source: QueryError,
        diagnostics: bool,
    },

    #[error("Failed to render page: {0}")]
    Render(#[from] minijinja::Error),
}

impl AppError {
    pub fn from_fetch(error: FetchError, diagnostics: bool) -> Self {
        match error {
            FetchError::Configuration(source) => AppError::Misconfigured {
                source,
                diagnostics,
            },
            FetchError::Query(source) => AppError::Query {
                source,
                diagnostics,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");

        let mut body = Map::new();
        body.insert("success".to_string(), Value::Bool(false));

        match &self {
            AppError::Misconfigured { diagnostics, .. } => {
                body.insert("message".to_string(), json!(MISCONFIGURED_MESSAGE));
                if *diagnostics {
                    body.insert("hint".to_string(), json!(MISCONFIGURED_HINT));
                }
            }
            AppError::Query {
                source,
                diagnostics,
            } => {
                body.insert("message".to_string(), json!(FETCH_FAILED_MESSAGE));
                if *diagnostics {
                    body.insert("details".to_string(), json!(source.to_string()));
                }
            }
            AppError::Render(_) => {
                body.insert("message".to_string(), json!("Internal error"));
            }
        }

        (StatusCode::INTERNAL_SERVER_ERROR, Json(Value::Object(body))).into_response()
    }
}
