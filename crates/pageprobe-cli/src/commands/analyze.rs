use crate::OutputFormat;
use anyhow::Result;
use console::style;
use indicatif::ProgressBar;
use pageprobe_browser::{BrowserOptions, analyze_page};
use pageprobe_core::render::{Grade, format_load_time, format_size};
use pageprobe_core::report::PerformanceReport;
use pageprobe_core::validate::validate_url;
use std::path::PathBuf;
use std::time::Duration;

pub async fn execute(
    raw_url: &str,
    format: OutputFormat,
    chrome_path: Option<PathBuf>,
    sandbox: bool,
) -> Result<()> {
    let url = validate_url(raw_url)?;

    let options = BrowserOptions {
        chrome_path,
        no_sandbox: !sandbox,
        ..BrowserOptions::default()
    };

    tracing::info!(%url, "starting analysis");

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Analyzing {url}..."));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = analyze_page(&url, options).await;
    spinner.finish_and_clear();
    let report = result?;

    match format {
        OutputFormat::Json => output_json(&report)?,
        OutputFormat::Pretty => output_pretty(&report),
    }

    Ok(())
}

fn output_pretty(report: &PerformanceReport) {
    let grade = Grade::from_load_time(report.load_time);
    let grade_display = match grade {
        Grade::A => style("A").green().bold(),
        Grade::B => style("B").yellow().bold(),
        Grade::C => style("C").color256(208).bold(),
        Grade::D => style("D").red().bold(),
    };

    println!("\n{}", style("Performance Analysis Results").bold().cyan());
    println!("{}", style("============================").cyan());

    println!("\n  URL:       {}", report.url);
    println!("  Analyzed:  {}", report.timestamp);
    println!("  Grade:     {grade_display}");

    println!("\n{}", style("Metrics:").bold());
    println!("  Load Time:  {}", format_load_time(report.load_time));
    println!("  Page Size:  {}", format_size(report.page_size.total));
    println!("  Requests:   {}", report.request_count);

    println!("\n{}", style("Resource Breakdown:").bold());
    println!("  HTML:        {}", format_size(report.page_size.html));
    println!("  CSS:         {}", format_size(report.page_size.css));
    println!("  JavaScript:  {}", format_size(report.page_size.js));
    println!("  Images:      {}", format_size(report.page_size.images));
    println!("  Other:       {}", format_size(report.page_size.other));

    if let Some(recommendations) = &report.recommendations {
        println!("\n{}", style("Recommendations:").bold());
        for recommendation in recommendations {
            println!("  - {recommendation}");
        }
    }

    println!();
}

fn output_json(report: &PerformanceReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
