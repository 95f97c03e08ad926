use anyhow::Result;
use pageprobe_browser::BrowserOptions;
use pageprobe_server::{AppState, BrowserAnalyzer};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

pub async fn execute(
    addr: SocketAddr,
    max_concurrent: usize,
    chrome_path: Option<PathBuf>,
    sandbox: bool,
) -> Result<()> {
    let options = BrowserOptions {
        chrome_path,
        no_sandbox: !sandbox,
        ..BrowserOptions::default()
    };

    let state = AppState::new(Arc::new(BrowserAnalyzer::new(options)), max_concurrent);

    println!("✓ Analyzer listening on http://{addr}");
    println!();
    println!("Open the address in a browser for the web UI, or POST a JSON body");
    println!("{{\"url\": \"example.com\"}} to /api/analyze.");
    println!();
    println!("Press Ctrl+C to stop.");

    pageprobe_server::serve(addr, state).await?;

    Ok(())
}
