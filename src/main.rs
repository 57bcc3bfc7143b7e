use anyhow::{Context, Result};
use netsuite_reports::{load_reports, ReportPipeline, Settings};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) settings + report definitions ────────────────────────────
    let settings = Settings::from_env().context("reading NETSUITE_* settings")?;
    let reports = load_reports(&settings.reports_file)?;
    info!(
        file = %settings.reports_file.display(),
        count = reports.len(),
        "loaded report definitions"
    );

    // ─── 3) fetch each report in turn ────────────────────────────────
    let pipeline = ReportPipeline::new(settings)?;
    let summary = pipeline.run(reports).await;

    info!(
        saved = summary.saved(),
        failed = summary.failed(),
        output = %pipeline.settings().output_dir.display(),
        "all done"
    );
    debug!(summary = %serde_json::to_string(&summary)?, "run summary");
    Ok(())
}
