use thiserror::Error;

/// Client-caused validation failures. The display strings are part of the
/// API contract and are surfaced verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("URL is required")]
    UrlRequired,

    #[error("Invalid URL format")]
    InvalidUrl,
}

pub type Result<T> = std::result::Result<T, Error>;
