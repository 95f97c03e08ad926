use crate::{Error, Result};
use url::Url;

/// Validate raw user input and normalize it into an absolute URL.
///
/// Input that does not start with `http` gets `https://` prepended before
/// parsing, so `example.com` and `https://example.com` validate identically.
/// The check is purely syntactic; no network lookup happens here.
pub fn validate_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::UrlRequired);
    }

    let normalized = if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&normalized).map_err(|_| Error::InvalidUrl)?;
    tracing::debug!(%url, "validated target URL");
    Ok(url)
}
