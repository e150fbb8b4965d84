use reqwest::StatusCode;
use thiserror::Error;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};

use super::client::SheetsClient;
use super::types::ValueRange;
use crate::credentials::SheetsAuth;
use crate::scoring::ResponseGrid;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Authentication failed. Your Sheets token or API key may be invalid or expired.")]
    Unauthorized,

    #[error("No permission to read spreadsheet '{0}'. Share it with the token's account or publish it.")]
    Forbidden(String),

    #[error("Spreadsheet '{0}' or its worksheet was not found.")]
    NotFound(String),

    #[error("Google Sheets rate limit exceeded. Wait a minute and try again.")]
    RateLimited,

    #[error("Google Sheets API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Request to Google Sheets failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    InvalidRequest(String),
}

impl SheetsError {
    /// Worth retrying: throttling, server errors and connection trouble.
    pub fn is_transient(&self) -> bool {
        match self {
            SheetsError::RateLimited | SheetsError::Transport(_) => true,
            SheetsError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn from_status(status: StatusCode, spreadsheet_id: &str, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => SheetsError::Unauthorized,
            StatusCode::FORBIDDEN => SheetsError::Forbidden(spreadsheet_id.to_string()),
            StatusCode::NOT_FOUND => SheetsError::NotFound(spreadsheet_id.to_string()),
            StatusCode::TOO_MANY_REQUESTS => SheetsError::RateLimited,
            _ => SheetsError::Api {
                status: status.as_u16(),
                body,
            },
        }
    }
}

impl SheetsClient {
    async fn fetch_once(&self, spreadsheet_id: &str, worksheet: &str) -> Result<ValueRange, SheetsError> {
        let url = self
            .values_url(spreadsheet_id, worksheet)
            .map_err(|e| SheetsError::InvalidRequest(e.to_string()))?;

        let mut request = self.http.get(url);
        if let SheetsAuth::Bearer(token) = &self.auth {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::from_status(status, spreadsheet_id, body));
        }

        Ok(response.json::<ValueRange>().await?)
    }

    /// Read a whole worksheet as a response grid.
    ///
    /// Transient failures are retried with exponential backoff (3 retries).
    pub async fn fetch_grid(&self, spreadsheet_id: &str, worksheet: &str) -> Result<ResponseGrid, SheetsError> {
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(std::time::Duration::from_secs(5))
            .take(3);

        let range = RetryIf::spawn(
            retry_strategy,
            || async {
                let result = self.fetch_once(spreadsheet_id, worksheet).await;
                if let Err(e) = &result {
                    tracing::debug!(spreadsheet_id, worksheet, error = %e, "sheets request failed");
                }
                result
            },
            |e: &SheetsError| e.is_transient(),
        )
        .await?;

        tracing::debug!(
            spreadsheet_id,
            worksheet,
            range = range.range.as_deref().unwrap_or(""),
            rows = range.values.len(),
            "fetched worksheet"
        );

        Ok(range.into())
    }
}
