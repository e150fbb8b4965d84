use serde::{Deserialize, Serialize};

use crate::scoring::Taxonomy;

pub const DEFAULT_WORKSHEET: &str = "Form Responses 1";
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MEMBERS_COLUMN: &str = "C";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,

    #[serde(default)]
    pub sheets: Option<SheetsConfig>,

    /// Overrides the built-in SMM taxonomy when present
    #[serde(default)]
    pub taxonomy: Option<Taxonomy>,
}

/// One assessment target and the spreadsheet holding its survey responses.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub name: String,
    pub spreadsheet_id: String,
    #[serde(default)]
    pub worksheet: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SheetsConfig {
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// API key for publicly shared sheets; SMM_SHEETS_API_KEY takes precedence
    #[serde(default)]
    pub api_key: Option<String>,
    /// Column holding respondent names
    #[serde(default)]
    pub members_column: Option<String>,
}

impl Config {
    pub fn effective_taxonomy(&self) -> Taxonomy {
        self.taxonomy.clone().unwrap_or_default()
    }

    pub fn project(&self, name: &str) -> Option<&ProjectConfig> {
        self.projects.iter().find(|p| p.name == name)
    }

    pub fn sheets_settings(&self) -> SheetsConfig {
        self.sheets.clone().unwrap_or_default()
    }
}

impl ProjectConfig {
    pub fn worksheet(&self) -> &str {
        self.worksheet.as_deref().unwrap_or(DEFAULT_WORKSHEET)
    }
}

impl SheetsConfig {
    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn members_column(&self) -> &str {
        self.members_column
            .as_deref()
            .unwrap_or(DEFAULT_MEMBERS_COLUMN)
    }
}
