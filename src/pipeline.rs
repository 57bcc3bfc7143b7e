// src/pipeline.rs
//! Fetch every configured report in order, one at a time.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::{fs, path::PathBuf, time::Instant};
use tracing::{debug, info, instrument, warn};

use crate::config::{LoadedReport, ReportDefinition, Settings};
use crate::error::ReportError;
use crate::fetch::{build_client, fetch_report_body, report_url};
use crate::history::{state::ReportState, ActivityLog};
use crate::process::{decode_body, extract_table, write_rows};

/// How one report ended.
#[derive(Clone, Debug, Serialize)]
pub struct ReportOutcome {
    pub report: String,
    pub state: ReportState,
    pub message: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct RunSummary {
    pub outcomes: Vec<ReportOutcome>,
}

impl RunSummary {
    pub fn saved(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.state == ReportState::Saved)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.saved()
    }
}

pub struct ReportPipeline {
    client: Client,
    settings: Settings,
    log: ActivityLog,
}

impl ReportPipeline {
    /// Build the shared client and make sure the output directory exists.
    pub fn new(settings: Settings) -> Result<Self> {
        let client = build_client(&settings.user_agent).context("building HTTP client")?;
        fs::create_dir_all(&settings.output_dir)
            .with_context(|| format!("creating output directory {:?}", settings.output_dir))?;
        let log = ActivityLog::new(&settings.log_file);
        Ok(Self {
            client,
            settings,
            log,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn csv_path(&self, report: &ReportDefinition) -> PathBuf {
        self.settings.output_dir.join(format!("{}.csv", report.name))
    }

    /// Process `reports` in order. A failed report never stops the run.
    pub async fn run(&self, reports: Vec<LoadedReport>) -> RunSummary {
        let mut summary = RunSummary::default();
        for (idx, loaded) in reports.into_iter().enumerate() {
            let outcome = match loaded {
                Ok(report) => self.process(&report).await,
                Err(err) => ReportOutcome {
                    report: format!("#{}", idx + 1),
                    state: ReportState::Invalid,
                    message: format!("Error reading report #{}: {}", idx + 1, err),
                },
            };
            self.announce(&outcome);
            summary.outcomes.push(outcome);
        }
        summary
    }

    #[instrument(level = "info", skip(self, report), fields(report = %report.name))]
    async fn process(&self, report: &ReportDefinition) -> ReportOutcome {
        let start = Instant::now();
        let (state, message) = match self.fetch_and_save(report).await {
            Ok(rows) => {
                info!(rows, elapsed = ?start.elapsed(), "saved");
                (ReportState::Saved, format!("Downloaded {} report.", report.name))
            }
            Err(err) => (
                err.state(),
                format!("Error {} {} report: {}", err.verb(), report.name, err),
            ),
        };

        ReportOutcome {
            report: report.name.clone(),
            state,
            message,
        }
    }

    // Ok carries the number of rows written.
    async fn fetch_and_save(&self, report: &ReportDefinition) -> Result<usize, ReportError> {
        let url = report_url(&self.settings.endpoint, report)?;
        let body = fetch_report_body(&self.client, url).await?;

        let html = decode_body(body)?;
        let rows = extract_table(&html)?;

        write_rows(&rows, &self.csv_path(report))?;
        Ok(rows.len())
    }

    // Print the outcome and append it to the activity log. A log failure is
    // reported but never changes the outcome.
    fn announce(&self, outcome: &ReportOutcome) {
        println!("{}", outcome.message);
        if outcome.state != ReportState::Saved {
            debug!(report = %outcome.report, state = outcome.state.as_str(), "report failed");
        }
        if let Err(e) = self.log.record(&outcome.message) {
            warn!(path = %self.log.path().display(), error = %e, "failed to write activity log");
        }
    }
}
