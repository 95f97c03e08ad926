use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use pageprobe_cli::{OutputFormat, commands};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pageprobe")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Analyze website performance with a headless browser",
    long_about = "Pageprobe loads a page in headless Chrome, measures the load time, \
                  aggregates fetched resource sizes by content type, and reports simple \
                  recommendations. Run one-off analyses from the terminal or serve the \
                  bundled web UI."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single URL and print the report
    Analyze {
        /// URL to analyze (scheme defaults to https://)
        #[arg(value_name = "URL")]
        url: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: OutputFormat,

        /// Path to the Chrome/Chromium binary
        #[arg(long, env = "PAGEPROBE_CHROME")]
        chrome_path: Option<PathBuf>,

        /// Keep Chrome's OS sandbox enabled (needs a non-root user)
        #[arg(long)]
        sandbox: bool,
    },

    /// Serve the web UI and JSON API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,

        /// Maximum number of concurrent browser instances
        #[arg(long, default_value_t = 4)]
        max_concurrent: usize,

        /// Path to the Chrome/Chromium binary
        #[arg(long, env = "PAGEPROBE_CHROME")]
        chrome_path: Option<PathBuf>,

        /// Keep Chrome's OS sandbox enabled (needs a non-root user)
        #[arg(long)]
        sandbox: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            url,
            format,
            chrome_path,
            sandbox,
        } => commands::analyze::execute(&url, format, chrome_path, sandbox).await,
        Commands::Serve {
            addr,
            max_concurrent,
            chrome_path,
            sandbox,
        } => commands::serve::execute(addr, max_concurrent, chrome_path, sandbox).await,
        Commands::Completions { shell } => {
            commands::completion::execute(shell, &mut Cli::command())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("pageprobe_cli=debug,pageprobe_core=debug,pageprobe_browser=debug,pageprobe_server=debug")
    } else {
        EnvFilter::new("pageprobe_cli=info,pageprobe_browser=info,pageprobe_server=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
