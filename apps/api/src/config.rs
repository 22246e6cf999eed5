use anyhow::{bail, Context, Result};

use crate::llm_client::GEMINI_API_BASE;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
/// Idle session lifetime bounds: one minute to 30 days.
const SESSION_TTL_RANGE: std::ops::RangeInclusive<i64> = 1..=43_200;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub gemini_model: String,
    pub temperature: f32,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub session_ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let temperature = optional_env("LLM_TEMPERATURE", 0.2_f32)?;
        if !(0.0..=2.0).contains(&temperature) {
            bail!("LLM_TEMPERATURE must be between 0.0 and 2.0, got {temperature}");
        }

        let session_ttl_minutes = optional_env("SESSION_TTL_MINUTES", 120_i64)?;
        check_session_ttl(session_ttl_minutes)?;

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| GEMINI_API_BASE.to_string()),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            temperature,
            port: optional_env("PORT", 8080_u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            session_ttl_minutes,
        })
    }

    /// Configuration used by tests: no secrets, default limits.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            gemini_api_key: "test-key".to_string(),
            gemini_api_base: GEMINI_API_BASE.to_string(),
            gemini_model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            session_ttl_minutes: 120,
        }
    }
}

fn check_session_ttl(minutes: i64) -> Result<()> {
    if !SESSION_TTL_RANGE.contains(&minutes) {
        bail!(
            "SESSION_TTL_MINUTES must be between {} and {}, got {minutes}",
            SESSION_TTL_RANGE.start(),
            SESSION_TTL_RANGE.end()
        );
    }
    Ok(())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
