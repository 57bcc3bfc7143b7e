// src/config/settings.rs

use std::{env, path::PathBuf};
use url::Url;

pub const DEFAULT_REPORTS_FILE: &str = "../netsuite_credentials.json";
pub const DEFAULT_OUTPUT_DIR: &str = "..";
pub const DEFAULT_LOG_FILE: &str = "../log.txt";

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/89.0.4389.82 Safari/537.36";

const NETSUITE_HOST: &str = "app.netsuite.com";
const WEBQUERY_PATH: &str = "/app/reporting/webquery.nl";

pub const ENV_REPORTS_FILE: &str = "NETSUITE_REPORTS_FILE";
pub const ENV_OUTPUT_DIR: &str = "NETSUITE_OUTPUT_DIR";
pub const ENV_LOG_FILE: &str = "NETSUITE_LOG_FILE";
pub const ENV_BASE_URL: &str = "NETSUITE_BASE_URL";

/// Where report requests are sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportEndpoint {
    /// `https://<compid>.app.netsuite.com/app/reporting/webquery.nl`
    NetSuite,
    /// A single URL used for every report regardless of `compid`.
    Fixed(Url),
}

impl ReportEndpoint {
    /// Base URL (no query) for the account `compid`.
    pub fn url_for(&self, compid: &str) -> Result<Url, url::ParseError> {
        match self {
            ReportEndpoint::NetSuite => {
                Url::parse(&format!("https://{}.{}{}", compid, NETSUITE_HOST, WEBQUERY_PATH))
            }
            ReportEndpoint::Fixed(url) => Ok(url.clone()),
        }
    }
}

/// Everything a run needs besides the report definitions themselves.
#[derive(Clone, Debug)]
pub struct Settings {
    pub reports_file: PathBuf,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    pub endpoint: ReportEndpoint,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reports_file: PathBuf::from(DEFAULT_REPORTS_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            endpoint: ReportEndpoint::NetSuite,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl Settings {
    /// Defaults, with any `NETSUITE_*` environment overrides applied.
    pub fn from_env() -> Result<Self, url::ParseError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, url::ParseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Settings::default();

        if let Some(v) = get(ENV_REPORTS_FILE) {
            settings.reports_file = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_OUTPUT_DIR) {
            settings.output_dir = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_LOG_FILE) {
            settings.log_file = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_BASE_URL) {
            settings.endpoint = ReportEndpoint::Fixed(Url::parse(v.trim())?);
        }
        Ok(settings)
    }
}
