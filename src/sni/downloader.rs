// src/sni/downloader.rs
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use super::targets::DownloadTarget;
use crate::error::DownloadError;
use crate::progress::TransferProgress;

/// Per-target result of a batch run
#[derive(Debug)]
pub enum DownloadOutcome {
    Downloaded { path: PathBuf, bytes: u64 },
    Failed { error: DownloadError },
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Downloaded { .. })
    }
}

/// Sequential mirror of remote range files into a local directory
pub struct BatchDownloader {
    http_client: reqwest::Client,
    output_dir: PathBuf,
    chunk_size: usize,
    show_progress: bool,
}

impl BatchDownloader {
    pub fn new(
        http_client: reqwest::Client,
        output_dir: impl Into<PathBuf>,
        chunk_size: usize,
        show_progress: bool,
    ) -> Self {
        Self {
            http_client,
            output_dir: output_dir.into(),
            chunk_size: chunk_size.max(1),
            show_progress,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Download every target in order. A failed target never stops the rest.
    pub async fn download_all(
        &self,
        targets: &[DownloadTarget],
    ) -> Vec<(DownloadTarget, DownloadOutcome)> {
        let mut outcomes = Vec::with_capacity(targets.len());

        for target in targets {
            let outcome = match self.download(target).await {
                Ok((path, bytes)) => {
                    info!("Saved {} ({} bytes)", path.display(), bytes);
                    DownloadOutcome::Downloaded { path, bytes }
                }
                Err(error) => {
                    warn!("Error downloading {}: {}", target.url, error);
                    DownloadOutcome::Failed { error }
                }
            };
            outcomes.push((target.clone(), outcome));
        }

        outcomes
    }

    /// Stream one target to `<output_dir>/<filename>`, returning the path and bytes written.
    ///
    /// On failure the destination is removed, so neither a stale copy from an
    /// earlier run nor a truncated body is left for extraction.
    pub async fn download(&self, target: &DownloadTarget) -> Result<(PathBuf, u64), DownloadError> {
        let result = self.fetch_to_file(target).await;

        if result.is_err() {
            let path = self.output_dir.join(&target.filename);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => debug!("Removed {} after failed download", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Could not remove {}: {}", path.display(), e),
            }
        }

        result
    }

    async fn fetch_to_file(&self, target: &DownloadTarget) -> Result<(PathBuf, u64), DownloadError> {
        debug!("Fetching {}", target.url);

        let response = self.http_client.get(&target.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status.as_u16()));
        }

        let total = response.content_length();
        debug!("{}: content-length {:?}", target.url, total);

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| DownloadError::Io {
                path: self.output_dir.clone(),
                source,
            })?;

        let path = self.output_dir.join(&target.filename);
        let io_err = |source| DownloadError::Io {
            path: path.clone(),
            source,
        };

        let mut file = tokio::fs::File::create(&path).await.map_err(io_err)?;
        let progress = TransferProgress::new(
            self.show_progress,
            &target.label,
            target.label_color(),
            total,
        );

        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(item) = stream.next().await {
            let bytes = match item {
                Ok(bytes) => bytes,
                Err(e) => {
                    progress.abandon();
                    return Err(e.into());
                }
            };

            for piece in bytes.chunks(self.chunk_size) {
                if let Err(e) = file.write_all(piece).await {
                    progress.abandon();
                    return Err(io_err(e));
                }
                written += piece.len() as u64;
                progress.advance(piece.len() as u64);
            }
        }

        file.flush().await.map_err(io_err)?;
        progress.finish();
        debug!("{}: {} bytes on progress bar", target.url, progress.position());

        Ok((path, written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_chunk_size_clamped() {
        let downloader = BatchDownloader::new(reqwest::Client::new(), "downloads", 0, false);
        assert_eq!(downloader.chunk_size, 1);
        assert_eq!(downloader.output_dir(), Path::new("downloads"));
    }

    #[test]
    fn test_outcome_is_success() {
        let ok = DownloadOutcome::Downloaded {
            path: PathBuf::from("downloads/a.txt"),
            bytes: 3,
        };
        let failed = DownloadOutcome::Failed {
            error: DownloadError::Status(404),
        };
        assert!(ok.is_success());
        assert!(!failed.is_success());
    }
}
