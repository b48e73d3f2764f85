// src/main.rs
use clap::Parser;
use crt_recon::cli::{exit_status, fetch_help, FetchAction, FetchCli, RunOutcome};
use crt_recon::config::Config;
use crt_recon::console::Console;
use crt_recon::crtsh::CrtShClient;
use std::process::ExitCode;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let no_arguments = std::env::args_os().len() <= 1;
    let cli = FetchCli::parse();
    let mut console = Console::new();

    // Help and usage errors never depend on the config file
    let (query, format) = match cli.action(no_arguments) {
        FetchAction::Help => {
            console.raw(&fetch_help(console.use_colors()));
            return Ok(ExitCode::SUCCESS);
        }
        FetchAction::Usage(err) => {
            console.failure(&err.to_string());
            return Ok(ExitCode::from(exit_status(RunOutcome::Usage, cli.strict)));
        }
        FetchAction::Download { query, format } => (query, Some(format)),
        FetchAction::Extract { query } => (query, None),
    };

    let config = Config::load(cli.config.as_deref())?;
    crt_recon::logging::init(cli.log_level().unwrap_or(&config.logging.level));

    let mut client = CrtShClient::new(
        &config.crtsh.base_url,
        Duration::from_secs(config.crtsh.timeout_secs),
    )?;
    if let Some(ref dir) = config.crtsh.output_dir {
        client = client.with_output_dir(dir);
    }

    let outcome = match format {
        Some(format) => match client.download_raw(&query, format, None).await {
            Ok(path) => {
                console.success(&format!("File downloaded successfully: {}", path.display()));
                RunOutcome::Completed
            }
            Err(e) => {
                console.failure(&format!("Failed to download file. {}", e));
                RunOutcome::Failed
            }
        },
        None => match client.extract(&query).await {
            Ok(summary) => {
                console.success(&format!(
                    "Data extracted and saved to {} ({} records).",
                    summary.subdomain_file.display(),
                    summary.record_count
                ));

                for (format, result) in &summary.raw_downloads {
                    match result {
                        Ok(path) => console.success(&format!(
                            "File downloaded successfully: {}",
                            path.display()
                        )),
                        Err(e) => {
                            tracing::warn!("{} download for {} failed: {}", format, query, e);
                            console.failure(&format!("Failed to download file. {}", e));
                        }
                    }
                }
                summary.outcome()
            }
            Err(e) => {
                console.failure(&format!("Failed to extract data. {}", e));
                RunOutcome::Failed
            }
        },
    };

    Ok(ExitCode::from(exit_status(outcome, cli.strict)))
}
