use std::{env, fmt::Display, fs::read_to_string, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use colleges::credentials::{KEY_VARIABLE, URL_VARIABLE};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_url: Option<String>,
    pub store_key: Option<String>,
    pub store_timeout: Duration,
    pub directory_api: Option<String>,
    /// Adds `hint`/`details`/`note` to API responses. Off when `APP_ENV=production`.
    pub diagnostics: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok(), read_secret)
    }

    pub fn from_vars(
        var: impl Fn(&str) -> Option<String>,
        secret: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let app_env: String = try_load(&var, "APP_ENV", "development")?;
        let timeout_ms: u64 = try_load(&var, "STORE_TIMEOUT_MS", "5000")?;

        Ok(Self {
            port: try_load(&var, "RUST_PORT", "1111")?,
            store_url: optional(&var, URL_VARIABLE),
            store_key: optional(&var, KEY_VARIABLE).or_else(|| secret(KEY_VARIABLE)),
            store_timeout: Duration::from_millis(timeout_ms),
            directory_api: optional(&var, "DIRECTORY_API_URL"),
            diagnostics: !app_env.trim().eq_ignore_ascii_case("production"),
        })
    }
}

fn optional(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    let value = var(key).filter(|v| !v.trim().is_empty());
    if value.is_none() {
        warn!("Environment variable {key} not found");
    }
    value
}

fn try_load<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Invalid {key} value: {raw}"))
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
        })
        .ok()
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_vars(|key| vars.get(key).cloned(), |_| None)
    }

    #[test]
    fn defaults() {
        let config = load(&[]).expect("config");

        assert_eq!(config.port, 1111);
        assert_eq!(config.store_url, None);
        assert_eq!(config.store_key, None);
        assert_eq!(config.store_timeout, Duration::from_secs(5));
        assert_eq!(config.directory_api, None);
        assert!(config.diagnostics);
    }

    #[test]
    fn reads_variables() {
        let config = load(&[
            ("RUST_PORT", "8080"),
            ("SUPABASE_URL", "https://abcd.supabase.co"),
            ("SUPABASE_ANON_KEY", "sb_publishable_x"),
            ("STORE_TIMEOUT_MS", "250"),
            ("APP_ENV", "Production"),
        ])
        .expect("config");

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.store_url.as_deref(),
            Some("https://abcd.supabase.co")
        );
        assert_eq!(config.store_key.as_deref(), Some("sb_publishable_x"));
        assert_eq!(config.store_timeout, Duration::from_millis(250));
        assert!(!config.diagnostics);
    }

    #[test]
    fn key_falls_back_to_secret_file() {
        let config = Config::from_vars(|_| None, |name| Some(format!("secret-for-{name}")))
            .expect("config");

        assert_eq!(
            config.store_key.as_deref(),
            Some("secret-for-SUPABASE_ANON_KEY")
        );
    }

    #[test]
    fn blank_values_are_missing() {
        let config = load(&[("SUPABASE_URL", "   ")]).expect("config");

        assert_eq!(config.store_url, None);
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = load(&[("RUST_PORT", "not-a-port")]).expect_err("invalid");

        assert!(err.to_string().contains("RUST_PORT"));
    }
}
