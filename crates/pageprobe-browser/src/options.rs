use crate::{Error, Result};
use chromiumoxide::browser::BrowserConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound on a single navigation, including every sub-resource that
/// blocks the load event.
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(45);

/// Options controlling how the analysis browser is launched.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Explicit Chrome/Chromium binary; autodetected when `None`.
    pub chrome_path: Option<PathBuf>,
    /// Launch Chrome with its OS-level sandbox disabled.
    ///
    /// Chrome refuses to start as root with the sandbox on, which is the
    /// common situation in container images, so this defaults to `true`.
    /// The page being analyzed is untrusted remote content: only keep this
    /// set when the whole process runs inside its own isolation boundary
    /// (container, restricted user), and pass `--sandbox` otherwise.
    pub no_sandbox: bool,
    pub navigation_timeout: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            chrome_path: None,
            no_sandbox: true,
            navigation_timeout: NAVIGATION_TIMEOUT,
        }
    }
}

impl BrowserOptions {
    /// Build the chromiumoxide launch config for one analysis run.
    ///
    /// Every run gets its own profile directory so no state leaks between
    /// analyses; the caller owns the directory and removes it afterwards.
    pub fn browser_config(&self, profile_dir: &Path) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder().user_data_dir(profile_dir);

        if self.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(Error::Browser)
    }
}
