use std::fmt;
use thiserror::Error;

/// Environment variable holding an OAuth bearer token for the Sheets API
pub const ENV_TOKEN_VAR: &str = "SMM_SHEETS_TOKEN";

/// Environment variable holding an API key (works for publicly shared sheets)
pub const ENV_API_KEY_VAR: &str = "SMM_SHEETS_API_KEY";

/// How requests to the Sheets API are authorized.
#[derive(Clone, PartialEq, Eq)]
pub enum SheetsAuth {
    Bearer(String),
    ApiKey(String),
}

// Keep secrets out of verbose logs.
impl fmt::Debug for SheetsAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetsAuth::Bearer(_) => write!(f, "Bearer(***)"),
            SheetsAuth::ApiKey(_) => write!(f, "ApiKey(***)"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error(
        "No Google Sheets credentials found. Set {} (OAuth token) or {} (API key), or add sheets.api_key to the config",
        ENV_TOKEN_VAR,
        ENV_API_KEY_VAR
    )]
    Missing,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Pick credentials: bearer token, then API key from the environment, then
/// the configured API key.
pub fn resolve_auth(
    env_token: Option<String>,
    env_api_key: Option<String>,
    config_api_key: Option<String>,
) -> Result<SheetsAuth, CredentialError> {
    if let Some(token) = non_blank(env_token) {
        return Ok(SheetsAuth::Bearer(token));
    }
    if let Some(key) = non_blank(env_api_key).or_else(|| non_blank(config_api_key)) {
        return Ok(SheetsAuth::ApiKey(key));
    }
    Err(CredentialError::Missing)
}

/// Resolve credentials from the process environment and config.
pub fn auth_from_env(config_api_key: Option<String>) -> Result<SheetsAuth, CredentialError> {
    resolve_auth(
        std::env::var(ENV_TOKEN_VAR).ok(),
        std::env::var(ENV_API_KEY_VAR).ok(),
        config_api_key,
    )
}
