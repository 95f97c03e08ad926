use crate::report::ResourceTotals;

/// Fixed advisory thresholds.
pub const SLOW_LOAD_MS: u64 = 3_000;
pub const LARGE_JS_BYTES: u64 = 500_000;
pub const LARGE_IMAGES_BYTES: u64 = 1_000_000;
pub const MANY_REQUESTS: u64 = 50;
pub const LARGE_CSS_BYTES: u64 = 200_000;

/// Produce advisory messages for metrics that exceed the fixed thresholds.
///
/// Rules are evaluated independently (a page can trip all five) and the
/// output order always matches the rule order below.
pub fn recommendations(
    load_time_ms: u64,
    page_size: &ResourceTotals,
    request_count: u64,
) -> Vec<String> {
    let mut out = Vec::new();

    if load_time_ms > SLOW_LOAD_MS {
        out.push("Consider optimizing overall page load performance".to_string());
    }
    if page_size.js > LARGE_JS_BYTES {
        out.push("Large JavaScript bundles - consider code splitting".to_string());
    }
    if page_size.images > LARGE_IMAGES_BYTES {
        out.push("Optimize images - compress or use modern formats".to_string());
    }
    if request_count > MANY_REQUESTS {
        out.push("High number of requests - consider resource bundling".to_string());
    }
    if page_size.css > LARGE_CSS_BYTES {
        out.push("Large CSS files - remove unused styles".to_string());
    }

    out
}
