use serde::Serialize;

/// How a single report ended its one pass through the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportState {
    FetchFailed,
    ParseFailed,
    WriteFailed,
    Invalid,
    Saved,
}

impl ReportState {
    pub fn as_str(&self) -> &str {
        match self {
            ReportState::FetchFailed => "FetchFailed",
            ReportState::ParseFailed => "ParseFailed",
            ReportState::WriteFailed => "WriteFailed",
            ReportState::Invalid => "Invalid",
            ReportState::Saved => "Saved",
        }
    }
}
