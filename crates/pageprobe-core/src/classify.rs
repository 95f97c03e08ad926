use crate::report::ResourceTotals;

/// One of the five mutually-exclusive size categories a response lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Html,
    Css,
    Js,
    Images,
    Other,
}

/// Classify a declared content type into a bucket.
///
/// Matching is by substring containment and the first matching rule wins:
/// html, css, js, images, other. Ambiguous or multi-valued headers that
/// match nothing fall to `Other`, as does an absent header (empty string).
pub fn classify(content_type: &str) -> Bucket {
    if content_type.contains("text/html") {
        Bucket::Html
    } else if content_type.contains("text/css") {
        Bucket::Css
    } else if content_type.contains("javascript") {
        Bucket::Js
    } else if content_type.contains("image/") {
        Bucket::Images
    } else {
        Bucket::Other
    }
}

/// Accumulates response sizes for a single analysis run.
///
/// Every run owns its own instance; nothing is shared across analyses.
#[derive(Debug, Default)]
pub struct ResourceAggregator {
    totals: ResourceTotals,
    request_count: u64,
}

impl ResourceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successfully-read response.
    ///
    /// Each call increments the grand total and the request counter exactly
    /// once; the declared content type decides which bucket also grows.
    pub fn record(&mut self, content_type: &str, bytes: u64) {
        self.totals.total += bytes;
        self.request_count += 1;

        match classify(content_type) {
            Bucket::Html => self.totals.html += bytes,
            Bucket::Css => self.totals.css += bytes,
            Bucket::Js => self.totals.js += bytes,
            Bucket::Images => self.totals.images += bytes,
            Bucket::Other => self.totals.other += bytes,
        }
    }

    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    pub fn totals(&self) -> ResourceTotals {
        self.totals
    }

    /// Consume the aggregator and hand back the final numbers.
    pub fn finish(self) -> (ResourceTotals, u64) {
        (self.totals, self.request_count)
    }
}
