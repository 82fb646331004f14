//! # Store Credentials
//!
//! The store needs an endpoint URL and an anonymous read key. Deployments have shipped with the
//! two swapped or with the URL missing its scheme, so resolution runs a few fixed checks before
//! anything reaches the HTTP client.
//!
//! ## Rules
//! - URL-shaped: starts with `http://` / `https://`, or contains `.supabase.co`
//! - Key-shaped: starts with `sb_` / `sb-`, starts with `eyJ` (JWT), or mentions
//!   `anon`, `publishable`, `public-`, `public_`
//! - URL is key-shaped **and** key is URL-shaped: swap them
//! - URL has no scheme at all but contains `.supabase.co`: prefix `https://`, and the result
//!   must then have a `*.supabase.co` host
//! - Anything else that does not parse as an absolute http(s) URL is an error, not a guess
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use tracing::{info, warn};

use crate::error::ConfigurationError;

pub const URL_VARIABLE: &str = "SUPABASE_URL";
pub const KEY_VARIABLE: &str = "SUPABASE_ANON_KEY";

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid regex"));
static KEY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:^sb[_-])|^eyJ").expect("valid regex"));
static KEY_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)anon|publishable|public[-_]").expect("valid regex"));

const SUPABASE_HOST: &str = ".supabase.co";

#[derive(Clone)]
pub struct Credentials {
    pub url: Url,
    pub key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url.as_str())
            .field("key", &mask(Some(self.key.as_str())))
            .finish()
    }
}

pub fn looks_like_url(value: &str) -> bool {
    SCHEME.is_match(value) || value.contains(SUPABASE_HOST)
}

pub fn looks_like_key(value: &str) -> bool {
    KEY_PREFIX.is_match(value) || KEY_WORDS.is_match(value)
}

/// Shows enough of a secret to recognise it in logs.
pub fn mask(value: Option<&str>) -> String {
    match value {
        None | Some("") => "<empty>".to_string(),
        Some(v) if v.chars().count() <= 10 => "*****".to_string(),
        Some(v) => {
            let chars: Vec<char> = v.chars().collect();
            let head: String = chars[..6].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{head}...{tail}")
        }
    }
}

pub fn resolve(url: Option<&str>, key: Option<&str>) -> Result<Credentials, ConfigurationError> {
    let url = url.map(str::trim).filter(|v| !v.is_empty());
    let key = key.map(str::trim).filter(|v| !v.is_empty());

    let (Some(mut url), Some(mut key)) = (url, key) else {
        warn!(
            url = %mask(url),
            key = %mask(key),
            "Store credentials missing"
        );

        let variable = if url.is_none() {
            URL_VARIABLE
        } else {
            KEY_VARIABLE
        };
        return Err(ConfigurationError::Missing { variable });
    };

    if looks_like_key(url) && looks_like_url(key) {
        warn!("{URL_VARIABLE} and {KEY_VARIABLE} look swapped, swapping them back");
        std::mem::swap(&mut url, &mut key);
    }

    let prefixed = !url.contains("://") && url.contains(SUPABASE_HOST);
    let url = if prefixed {
        info!("Adding https:// to {URL_VARIABLE}");
        format!("https://{url}")
    } else {
        url.to_string()
    };

    let parsed = Url::parse(&url)
        .ok()
        .filter(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .filter(|parsed| match parsed.host_str() {
            Some(host) if prefixed => host.ends_with(SUPABASE_HOST),
            Some(_) => true,
            None => false,
        })
        .ok_or_else(|| {
            warn!(url = %mask(Some(url.as_str())), "Invalid {URL_VARIABLE}");
            ConfigurationError::InvalidUrl {
                value: mask(Some(url.as_str())),
            }
        })?;

    Ok(Credentials {
        url: parsed,
        key: key.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.payload.signature";

    #[test]
    fn accepts_well_formed_pair() {
        let creds = resolve(Some("https://abcd.supabase.co"), Some(KEY)).expect("credentials");

        assert_eq!(creds.url.as_str(), "https://abcd.supabase.co/");
        assert_eq!(creds.key, KEY);
    }

    #[test]
    fn trims_values() {
        let creds = resolve(Some(" https://abcd.supabase.co \n"), Some(" sb_key ")).expect("ok");

        assert_eq!(creds.url.host_str(), Some("abcd.supabase.co"));
        assert_eq!(creds.key, "sb_key");
    }

    #[test]
    fn swaps_when_both_look_swapped() {
        let creds = resolve(Some(KEY), Some("https://abcd.supabase.co")).expect("credentials");

        assert_eq!(creds.url.host_str(), Some("abcd.supabase.co"));
        assert_eq!(creds.key, KEY);
    }

    #[test]
    fn does_not_swap_when_only_one_side_matches() {
        let err = resolve(Some(KEY), Some("plain-secret")).expect_err("ambiguous");

        assert!(matches!(err, ConfigurationError::InvalidUrl { .. }));
    }

    #[test]
    fn adds_scheme_to_supabase_host() {
        let creds = resolve(Some("abcd.supabase.co"), Some(KEY)).expect("credentials");

        assert_eq!(creds.url.scheme(), "https");
        assert_eq!(creds.url.host_str(), Some("abcd.supabase.co"));
    }

    #[test]
    fn rejects_schemeless_unknown_host() {
        let err = resolve(Some("example.com"), Some(KEY)).expect_err("invalid");

        assert!(matches!(err, ConfigurationError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = resolve(Some("ftp://abcd.supabase.co"), Some(KEY)).expect_err("invalid");

        assert!(matches!(err, ConfigurationError::InvalidUrl { .. }));
    }

    #[test]
    fn does_not_prefix_over_another_scheme() {
        for value in ["ws://abcd.supabase.co", "FTP://abcd.supabase.co/rest"] {
            let err = resolve(Some(value), Some(KEY)).expect_err(value);

            assert!(matches!(err, ConfigurationError::InvalidUrl { .. }), "{value}");
        }
    }

    #[test]
    fn rejects_prefix_that_lands_on_another_host() {
        let err = resolve(Some("https//abcd.supabase.co"), Some(KEY)).expect_err("invalid");

        assert!(matches!(err, ConfigurationError::InvalidUrl { .. }));
    }

    #[test]
    fn keeps_path_after_prefixing() {
        let creds = resolve(Some("abcd.supabase.co/base"), Some(KEY)).expect("credentials");

        assert_eq!(creds.url.as_str(), "https://abcd.supabase.co/base");
    }

    #[test]
    fn reports_missing_variable() {
        let err = resolve(None, Some(KEY)).expect_err("missing url");
        assert!(matches!(
            err,
            ConfigurationError::Missing { variable } if variable == URL_VARIABLE
        ));

        let err = resolve(Some("https://abcd.supabase.co"), Some("   ")).expect_err("missing key");
        assert!(matches!(
            err,
            ConfigurationError::Missing { variable } if variable == KEY_VARIABLE
        ));
    }

    #[test]
    fn key_patterns() {
        assert!(looks_like_key("sb_publishable_abc"));
        assert!(looks_like_key("SB-secret"));
        assert!(looks_like_key(KEY));
        assert!(looks_like_key("my-anon-key"));
        assert!(looks_like_key("public_token"));
        assert!(!looks_like_key("https://abcd.supabase.co"));
    }

    #[test]
    fn url_patterns() {
        assert!(looks_like_url("HTTPS://example.com"));
        assert!(looks_like_url("abcd.supabase.co"));
        assert!(!looks_like_url(KEY));
    }

    #[test]
    fn masks_secrets() {
        assert_eq!(mask(None), "<empty>");
        assert_eq!(mask(Some("short")), "*****");
        assert_eq!(mask(Some("0123456789abcdef")), "012345...cdef");
    }
}
