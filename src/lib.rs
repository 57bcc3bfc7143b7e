pub mod config;
pub mod error;
pub mod fetch;
pub mod history;
pub mod pipeline;
pub mod process;

pub use config::{load_reports, ReportDefinition, Settings};
pub use pipeline::{ReportPipeline, RunSummary};
