// src/fetch/mod.rs

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::config::{ReportDefinition, ReportEndpoint};
use crate::error::FetchError;

/// The one client shared by every report in a run: a browser user agent and
/// a cookie jar, like a browser session.
pub fn build_client(user_agent: &str) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .cookie_store(true)
        .build()
}

/// Full request URL for `report`: endpoint plus every parameter except `name`.
pub fn report_url(endpoint: &ReportEndpoint, report: &ReportDefinition) -> Result<Url, FetchError> {
    let mut url = endpoint.url_for(&report.compid)?;
    if !report.params.is_empty() {
        url.query_pairs_mut().extend_pairs(&report.params);
    }
    Ok(url)
}

/// GET `url` and return the raw body of a 2xx response.
pub async fn fetch_report_body(client: &Client, url: Url) -> Result<Vec<u8>, FetchError> {
    // The query holds credentials; log only where we are going.
    debug!(host = url.host_str().unwrap_or(""), path = url.path(), "GET report");
    let resp = client.get(url).send().await?.error_for_status()?;
    debug!(status = %resp.status(), "report response");
    Ok(resp.bytes().await?.to_vec())
}
