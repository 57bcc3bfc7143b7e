pub mod reports;
pub mod settings;

pub use reports::{load_reports, LoadedReport, ReportDefinition};
pub use settings::{ReportEndpoint, Settings};
