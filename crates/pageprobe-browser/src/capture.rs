use crate::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventLoadingFailed, EventLoadingFinished, EventResponseReceived,
    GetResponseBodyParams, RequestId,
};
use futures::StreamExt;
use pageprobe_core::classify::ResourceAggregator;
use pageprobe_core::report::ResourceTotals;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::oneshot;

/// Totals delivered once the capture task has drained.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageResources {
    pub totals: ResourceTotals,
    pub request_count: u64,
}

/// How long to keep consuming straggling response observations after the
/// load event has fired and drain has been requested.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Start observing network responses on `page`.
///
/// Returns `(drain_tx, result_rx)`: send `()` on `drain_tx` once navigation
/// has completed. The capture task keeps consuming events until every
/// response it has seen is measured (or the grace period expires) and then
/// delivers the totals on `result_rx` — an explicit completion barrier, so
/// totals never depend on load-event scheduling coincidence.
pub async fn observe_responses(
    page: &Page,
) -> Result<(oneshot::Sender<()>, oneshot::Receiver<PageResources>)> {
    page.execute(EnableParams::default()).await?;

    let mut response_events = page.event_listener::<EventResponseReceived>().await?;
    let mut finished_events = page.event_listener::<EventLoadingFinished>().await?;
    let mut failed_events = page.event_listener::<EventLoadingFailed>().await?;

    let (drain_tx, mut drain_rx) = oneshot::channel::<()>();
    let (result_tx, result_rx) = oneshot::channel::<PageResources>();

    let page = page.clone();
    tokio::spawn(async move {
        let mut aggregator = ResourceAggregator::new();
        // Content type per request id for responses still awaiting their
        // loadingFinished event.
        let mut pending: HashMap<String, String> = HashMap::new();
        let mut draining = false;

        let grace = tokio::time::sleep(DRAIN_GRACE);
        tokio::pin!(grace);

        loop {
            tokio::select! {
                // Biased so buffered responseReceived events are handled
                // before the matching loadingFinished.
                biased;

                Some(event) = response_events.next() => {
                    let request_id = event.request_id.inner().to_string();
                    let content_type = find_content_type(event.response.headers.inner());
                    tracing::trace!(%request_id, %content_type, url = %event.response.url, "response observed");
                    pending.insert(request_id, content_type);
                }
                Some(event) = finished_events.next() => {
                    let request_id = event.request_id.inner().to_string();
                    if let Some(content_type) = pending.remove(&request_id) {
                        match body_length(&page, event.request_id.clone()).await {
                            Ok(bytes) => aggregator.record(&content_type, bytes),
                            // Cross-origin and bodyless responses cannot be
                            // read back; they are left out of the totals.
                            Err(e) => {
                                tracing::debug!(%request_id, "skipping unreadable response body: {e}");
                            }
                        }
                    }
                    if draining && pending.is_empty() {
                        break;
                    }
                }
                Some(event) = failed_events.next() => {
                    pending.remove(event.request_id.inner().as_str());
                    if draining && pending.is_empty() {
                        break;
                    }
                }
                _ = &mut drain_rx, if !draining => {
                    if pending.is_empty() {
                        break;
                    }
                    tracing::debug!(pending = pending.len(), "draining in-flight observations");
                    draining = true;
                    grace.as_mut().reset(tokio::time::Instant::now() + DRAIN_GRACE);
                }
                _ = &mut grace, if draining => {
                    tracing::debug!(
                        unresolved = pending.len(),
                        "drain grace expired, dropping unfinished responses"
                    );
                    break;
                }
                else => break,
            }
        }

        let (totals, request_count) = aggregator.finish();
        let _ = result_tx.send(PageResources {
            totals,
            request_count,
        });
    });

    Ok((drain_tx, result_rx))
}

/// Fetch a finished response's body and return its size in bytes.
async fn body_length(page: &Page, request_id: RequestId) -> Result<u64> {
    let body = page.execute(GetResponseBodyParams::new(request_id)).await?;
    decoded_body_len(&body.body, body.base64_encoded)
}

fn decoded_body_len(body: &str, base64_encoded: bool) -> Result<u64> {
    if base64_encoded {
        let bytes = BASE64
            .decode(body.as_bytes())
            .map_err(|e| Error::Cdp(format!("invalid base64 response body: {e}")))?;
        Ok(bytes.len() as u64)
    } else {
        Ok(body.len() as u64)
    }
}

/// Look up the declared content type in a CDP header map.
///
/// CDP preserves whatever casing the server sent for header names; an
/// absent header is treated as an empty string.
fn find_content_type(headers: &serde_json::Value) -> String {
    serde_json::from_value::<HashMap<String, String>>(headers.clone())
        .ok()
        .and_then(|map| {
            map.into_iter()
                .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
                .map(|(_, value)| value)
        })
        .unwrap_or_default()
}
