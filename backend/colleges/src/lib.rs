//! # Colleges
//!
//! Read-only access to the verified college directory.
//!
//! ## Sources
//! - [`store::SupabaseStore`]: queries the `colleges` table over PostgREST, only rows
//!   with `verified = true`, newest first.
//! - [`remote::RemoteDirectory`]: reads an already running directory endpoint
//!   (`{ success, data, count }`).
//!
//! Both hand back complete [`CollegeRecord`] lists or an error, never a partial set.
//!
//! ## Normalization
//! District, type and ownership are free text. Before they are used as filter keys they go
//! through [`normalize_text`] so `"  Pune "` and `"Pune"` are one option.
use async_trait::async_trait;
use reqwest::Url;

pub mod credentials;
pub mod error;
pub mod fields;
pub mod record;
pub mod remote;
pub mod store;

pub use error::{ConfigurationError, FetchError, QueryError};
pub use record::CollegeRecord;

/// Anything that can produce the verified college list.
#[async_trait]
pub trait CollegeSource: Send + Sync {
    async fn fetch_verified_colleges(&self) -> Result<Vec<CollegeRecord>, FetchError>;
}

/// Trims and collapses internal whitespace runs to a single space.
pub fn normalize_text(input: &str) -> String {
    let mut normalized = String::with_capacity(input.len());

    for word in input.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(word);
    }

    normalized
}

/// True for values that parse as an absolute `http`/`https` URL with a host.
pub fn is_absolute_http_url(value: &str) -> bool {
    Url::parse(value.trim())
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}
