use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use std::time::Duration;

use crate::config::SheetsConfig;
use crate::credentials::SheetsAuth;

/// Google Sheets v4 client for reading worksheet values.
#[derive(Clone, Debug)]
pub struct SheetsClient {
    pub(crate) http: reqwest::Client,
    pub(crate) auth: SheetsAuth,
    api_base: String,
}

impl SheetsClient {
    pub fn new(settings: &SheetsConfig, auth: SheetsAuth) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs()))
            .user_agent(concat!("smm-score/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create Google Sheets client")?;

        Ok(Self {
            http,
            auth,
            api_base: settings.api_base().to_string(),
        })
    }

    /// URL of `values.get` for a whole worksheet. The worksheet name is the A1
    /// range, percent-encoded as one path segment.
    pub fn values_url(&self, spreadsheet_id: &str, worksheet: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .with_context(|| format!("Invalid Sheets API base URL '{}'", self.api_base))?;

        url.path_segments_mut()
            .map_err(|_| anyhow!("Sheets API base URL cannot have a path: {}", self.api_base))?
            .pop_if_empty()
            .push("spreadsheets")
            .push(spreadsheet_id)
            .push("values")
            .push(worksheet);

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("majorDimension", "ROWS");
            if let SheetsAuth::ApiKey(key) = &self.auth {
                query.append_pair("key", key);
            }
        }

        Ok(url)
    }
}
