use crate::{BrowserOptions, PageLoader, Result};
use pageprobe_core::report::PerformanceReport;
use url::Url;

/// Run one full analysis: navigate, aggregate, and assemble the report.
///
/// `url` must already be validated and normalized; both the HTTP handler
/// and the CLI go through this entry point.
pub async fn analyze_page(url: &Url, options: BrowserOptions) -> Result<PerformanceReport> {
    let loader = PageLoader::new(options);
    let metrics = loader.load(url).await?;

    Ok(PerformanceReport::assemble(
        url,
        metrics.load_time.as_millis() as u64,
        metrics.totals,
        metrics.request_count,
    ))
}
