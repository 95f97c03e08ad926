use crate::recommend;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Body of `POST /api/analyze`.
///
/// `url` defaults to an empty string when the field is absent so a missing
/// value reports "URL is required" instead of a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub url: String,
}

/// Byte totals for one analysis run, grouped by resource category.
///
/// `total` always equals the sum of the five buckets: the aggregator adds
/// every recorded response to `total` and to exactly one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTotals {
    pub total: u64,
    pub html: u64,
    pub css: u64,
    pub js: u64,
    pub images: u64,
    pub other: u64,
}

/// Final record for one analysis run. Assembled once, never mutated, never
/// persisted; its lifetime ends with the response that carries it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub url: String,
    /// Wall-clock milliseconds from navigation start to the load event.
    pub load_time: u64,
    pub request_count: u64,
    pub page_size: ResourceTotals,
    /// RFC 3339 UTC timestamp taken at assembly time.
    pub timestamp: String,
    /// Omitted from the serialized report when no rule fired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

impl PerformanceReport {
    /// Assemble the final report from the measured numbers, running the
    /// recommendation rules and stamping the current time.
    pub fn assemble(
        url: &Url,
        load_time_ms: u64,
        page_size: ResourceTotals,
        request_count: u64,
    ) -> Self {
        let recommendations = recommend::recommendations(load_time_ms, &page_size, request_count);

        Self {
            url: url.to_string(),
            load_time: load_time_ms,
            request_count,
            page_size,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            recommendations: if recommendations.is_empty() {
                None
            } else {
                Some(recommendations)
            },
        }
    }
}
