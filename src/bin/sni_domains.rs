// src/bin/sni_domains.rs
use anyhow::Context;
use clap::Parser;
use colored::Color;
use crt_recon::cli::{exit_status, SniCli};
use crt_recon::config::Config;
use crt_recon::console::Console;
use crt_recon::sni::{
    batch_outcome, extract_domains_from_dir, write_domains, BatchDownloader, DownloadOutcome,
};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = SniCli::parse();
    let config = Config::load(cli.config.as_deref())?;

    crt_recon::logging::init(cli.log_level().unwrap_or(&config.logging.level));

    let mut console = Console::new();
    console.line(Color::Cyan, "🚀 Starting Domain IP Range Downloader 🌐");

    std::fs::create_dir_all(&config.sni.output_dir).with_context(|| {
        format!("Failed to create {}", config.sni.output_dir.display())
    })?;

    let http_client = reqwest::Client::builder()
        .gzip(true)
        .build()
        .context("Failed to build HTTP client")?;

    let downloader = BatchDownloader::new(
        http_client,
        &config.sni.output_dir,
        config.sni.chunk_size,
        cli.should_show_progress(),
    );

    let outcomes = downloader.download_all(&config.sni.targets).await;

    for (target, outcome) in &outcomes {
        if let DownloadOutcome::Failed { error } = outcome {
            console.failure(&format!("Error downloading {}: {}", target.url, error));
        }
    }

    console.line(Color::Yellow, "\n🔍 Extracting Unique Domains...");

    let report = extract_domains_from_dir(downloader.output_dir())?;
    for failure in &report.failures {
        console.failure(&format!(
            "Error processing file {}: {}",
            failure.path.display(),
            failure.error
        ));
    }

    write_domains(&config.sni.domains_file, &report.domains)?;

    tracing::info!(
        "{} files scanned, {} skipped",
        report.files_scanned,
        report.failures.len()
    );

    console.success("\n✅ Download and Extraction Complete!");
    console.line(
        Color::Cyan,
        &format!("Total unique domains extracted: {}", report.domains.len()),
    );
    console.line(
        Color::Magenta,
        &format!("Domains have been saved to {}", config.sni.domains_file.display()),
    );

    let outcome = batch_outcome(&outcomes, &report);
    Ok(ExitCode::from(exit_status(outcome, cli.strict)))
}
