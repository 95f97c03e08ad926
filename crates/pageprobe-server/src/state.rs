use crate::Analyzer;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Shared state for the analysis service.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn Analyzer>,
    /// Bounds how many browser processes may run at once; each analysis
    /// still gets its own isolated process and its own counters. Requests
    /// past the bound queue on the semaphore instead of piling up browser
    /// instances.
    pub limiter: Arc<Semaphore>,
}

impl AppState {
    pub fn new(analyzer: Arc<dyn Analyzer>, max_concurrent: usize) -> Self {
        Self {
            analyzer,
            limiter: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }
}
