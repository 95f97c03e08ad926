use async_trait::async_trait;
use pageprobe_browser::BrowserOptions;
use pageprobe_core::report::PerformanceReport;
use url::Url;

/// Seam between the HTTP layer and the browser driver, so the router can be
/// tested without launching Chrome.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, url: &Url) -> pageprobe_browser::Result<PerformanceReport>;
}

/// Analyzer backed by a real headless browser, one process per call.
pub struct BrowserAnalyzer {
    options: BrowserOptions,
}

impl BrowserAnalyzer {
    pub fn new(options: BrowserOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Analyzer for BrowserAnalyzer {
    async fn analyze(&self, url: &Url) -> pageprobe_browser::Result<PerformanceReport> {
        pageprobe_browser::analyze_page(url, self.options.clone()).await
    }
}
