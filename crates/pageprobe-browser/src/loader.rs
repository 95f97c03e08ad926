use crate::capture::{self, PageResources};
use crate::{BrowserOptions, Error, Result};
use chromiumoxide::browser::Browser;
use futures::StreamExt;
use pageprobe_core::report::ResourceTotals;
use std::time::{Duration, Instant};
use url::Url;

/// Everything measured during one navigation.
#[derive(Debug, Clone, Copy)]
pub struct PageLoadMetrics {
    pub load_time: Duration,
    pub totals: ResourceTotals,
    pub request_count: u64,
}

/// Drives one isolated browser process through a single navigation and
/// collects resource totals for it.
pub struct PageLoader {
    options: BrowserOptions,
}

impl PageLoader {
    pub fn new(options: BrowserOptions) -> Self {
        Self { options }
    }

    /// Load `url` once and measure it.
    ///
    /// A fresh browser process with a fresh profile is launched for every
    /// call and torn down again on every exit path, navigation failures and
    /// timeouts included.
    pub async fn load(&self, url: &Url) -> Result<PageLoadMetrics> {
        let profile = tempfile::tempdir()?;
        let config = self.options.browser_config(profile.path())?;

        tracing::info!(%url, "launching browser");
        let (mut browser, mut handler) = Browser::launch(config).await?;

        // The handler stream must be polled for any CDP command to make
        // progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {e}");
                }
            }
        });

        let result = self.navigate_and_measure(&browser, url).await;

        if let Err(e) = browser.close().await {
            tracing::warn!("failed to close browser cleanly: {e}");
        }
        let _ = browser.wait().await;
        handler_task.abort();

        result
    }

    async fn navigate_and_measure(&self, browser: &Browser, url: &Url) -> Result<PageLoadMetrics> {
        let page = browser.new_page("about:blank").await?;

        // Subscribe before navigating so the document response is observed.
        let (drain_tx, result_rx) = capture::observe_responses(&page).await?;

        let started = Instant::now();
        let navigation = async {
            page.goto(url.as_str()).await?;
            page.wait_for_navigation().await?;
            Ok::<_, Error>(())
        };
        match tokio::time::timeout(self.options.navigation_timeout, navigation).await {
            Ok(outcome) => outcome?,
            Err(_) => return Err(Error::NavigationTimeout(self.options.navigation_timeout)),
        }
        let load_time = started.elapsed();

        // Completion barrier: ask the capture task to drain, then wait for
        // the totals it hands back.
        let _ = drain_tx.send(());
        let resources: PageResources = result_rx
            .await
            .map_err(|_| Error::Cdp("capture task ended before delivering totals".to_string()))?;

        tracing::info!(
            load_ms = load_time.as_millis() as u64,
            requests = resources.request_count,
            total_bytes = resources.totals.total,
            "navigation complete"
        );

        Ok(PageLoadMetrics {
            load_time,
            totals: resources.totals,
            request_count: resources.request_count,
        })
    }
}
