// src/sni/mod.rs
pub mod downloader;
pub mod extract;
pub mod targets;

pub use downloader::{BatchDownloader, DownloadOutcome};
pub use extract::{extract_domains_from_dir, write_domains, DomainSet, ExtractionReport};
pub use targets::{default_targets, DownloadTarget};

use crate::cli::RunOutcome;

/// `Failed` when any target failed to download or any range file was skipped
pub fn batch_outcome(
    outcomes: &[(DownloadTarget, DownloadOutcome)],
    report: &ExtractionReport,
) -> RunOutcome {
    let downloads_ok = outcomes.iter().all(|(_, outcome)| outcome.is_success());
    if downloads_ok && report.failures.is_empty() {
        RunOutcome::Completed
    } else {
        RunOutcome::Failed
    }
}
