//! Error types for loading report definitions and running reports.

use std::{io, path::PathBuf};
use thiserror::Error;

use crate::history::state::ReportState;

/// Failure to read the report configuration. Fatal to the whole run.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("parsing YAML in {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A single config entry that cannot be turned into a report definition.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("missing required key `{0}`")]
    MissingKey(&'static str),

    #[error("key `{key}` {reason}")]
    InvalidValue { key: String, reason: &'static str },
}

/// The request for a report could not be made or was not successful.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid report URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    // The request URL carries the report credentials in its query string.
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err.without_url())
    }
}

/// The response body did not hold a usable table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("No table element found in the provided HTML")]
    NoTable,

    #[error("response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Writing the extracted rows to disk failed.
#[derive(Error, Debug)]
#[error("writing {path:?}: {source}")]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: csv::Error,
}

/// Every way a single report can fail. None of these abort the run.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

impl ReportError {
    /// The terminal state a report ends in when it fails with this error.
    pub fn state(&self) -> ReportState {
        match self {
            ReportError::Definition(_) => ReportState::Invalid,
            ReportError::Fetch(_) => ReportState::FetchFailed,
            ReportError::Parse(_) => ReportState::ParseFailed,
            ReportError::Write(_) => ReportState::WriteFailed,
        }
    }

    /// The step that failed, as used in `Error <verb> <name> report: ...`.
    pub fn verb(&self) -> &'static str {
        match self {
            ReportError::Definition(_) => "reading",
            ReportError::Fetch(_) => "fetching",
            ReportError::Parse(_) => "parsing",
            ReportError::Write(_) => "saving",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_errors_map_to_failed_states() {
        assert_eq!(
            ReportError::from(ParseError::NoTable).state(),
            ReportState::ParseFailed
        );
        assert_eq!(
            ReportError::from(DefinitionError::MissingKey("name")).state(),
            ReportState::Invalid
        );
        let url_err = url::Url::parse("https://bad host/").unwrap_err();
        assert_eq!(
            ReportError::from(FetchError::from(url_err)).state(),
            ReportState::FetchFailed
        );
    }

    #[test]
    fn verbs_name_the_failed_step() {
        assert_eq!(ReportError::from(ParseError::NoTable).verb(), "parsing");
        assert_eq!(
            ReportError::from(DefinitionError::MissingKey("name")).verb(),
            "reading"
        );
    }

    #[test]
    fn no_table_message_is_stable() {
        assert_eq!(
            ParseError::NoTable.to_string(),
            "No table element found in the provided HTML"
        );
    }
}
