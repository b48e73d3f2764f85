// src/crtsh/client.rs
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::types::{raw_filename, subdomain_filename, CertificateRecord, DataFormat};
use crate::cli::RunOutcome;
use crate::error::FetchError;

/// Outcome of extraction mode
#[derive(Debug)]
pub struct ExtractSummary {
    pub subdomain_file: PathBuf,
    pub record_count: usize,
    /// Follow-up raw downloads, JSON first then CSV
    pub raw_downloads: Vec<(DataFormat, Result<PathBuf, FetchError>)>,
}

impl ExtractSummary {
    /// `Failed` when either follow-up raw download failed
    pub fn outcome(&self) -> RunOutcome {
        if self.raw_downloads.iter().all(|(_, result)| result.is_ok()) {
            RunOutcome::Completed
        } else {
            RunOutcome::Failed
        }
    }
}

/// HTTP client for the crt.sh lookup endpoints
pub struct CrtShClient {
    base_url: Url,
    http_client: reqwest::Client,
    output_dir: Option<PathBuf>,
}

impl CrtShClient {
    /// Create a new crt.sh client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(base_url).map_err(|_| FetchError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            base_url,
            http_client,
            output_dir: None,
        })
    }

    /// Write output files under `dir` instead of the working directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// `{base_url}/{format}?q={query}` with the query form-encoded
    pub fn endpoint(&self, format: DataFormat, query: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(format.as_str());
        }
        url.set_query(None);
        url.query_pairs_mut().append_pair("q", query);
        url
    }

    fn output_path(&self, filename: &str) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(filename),
            None => PathBuf::from(filename),
        }
    }

    async fn get_ok(&self, url: Url) -> Result<reqwest::Response, FetchError> {
        debug!("GET {}", url);

        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            debug!("crt.sh answered {}", status);
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response)
    }

    /// Save the raw response for `query` in `format`.
    ///
    /// Nothing is written unless the service answers 200.
    pub async fn download_raw(
        &self,
        query: &str,
        format: DataFormat,
        save_as: Option<&Path>,
    ) -> Result<PathBuf, FetchError> {
        let response = self.get_ok(self.endpoint(format, query)).await?;
        let body = response.bytes().await?;

        let path = match save_as {
            Some(path) => path.to_path_buf(),
            None => self.output_path(&raw_filename(query, format)),
        };

        tokio::fs::write(&path, &body)
            .await
            .map_err(|source| FetchError::Io {
                path: path.clone(),
                source,
            })?;

        debug!("Wrote {} bytes to {}", body.len(), path.display());
        Ok(path)
    }

    /// Fetch and decode the JSON record listing for `query`
    pub async fn fetch_records(&self, query: &str) -> Result<Vec<CertificateRecord>, FetchError> {
        let response = self.get_ok(self.endpoint(DataFormat::Json, query)).await?;
        let body = response.bytes().await?;
        let records: Vec<CertificateRecord> = serde_json::from_slice(&body)?;

        debug!("Decoded {} records for {}", records.len(), query);
        Ok(records)
    }

    /// Write `common_name` and `name_value` of every record to the subdomain
    /// file, then save the raw JSON and CSV responses.
    pub async fn extract(&self, query: &str) -> Result<ExtractSummary, FetchError> {
        let records = self.fetch_records(query).await?;

        let subdomain_file = self.output_path(&subdomain_filename(query));
        tokio::fs::write(&subdomain_file, render_records(&records))
            .await
            .map_err(|source| FetchError::Io {
                path: subdomain_file.clone(),
                source,
            })?;

        let mut raw_downloads = Vec::with_capacity(DataFormat::ALL.len());
        for format in DataFormat::ALL {
            let result = self.download_raw(query, format, None).await;
            raw_downloads.push((format, result));
        }

        Ok(ExtractSummary {
            subdomain_file,
            record_count: records.len(),
            raw_downloads,
        })
    }
}

/// Two lines per record: common name, then name value
pub fn render_records(records: &[CertificateRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(record.common_name());
        out.push('\n');
        out.push_str(record.name_value());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> CrtShClient {
        CrtShClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint() {
        let client = client("https://crt.sh");
        assert_eq!(
            client.endpoint(DataFormat::Json, "google").as_str(),
            "https://crt.sh/json?q=google"
        );
        assert_eq!(
            client.endpoint(DataFormat::Csv, "google").as_str(),
            "https://crt.sh/csv?q=google"
        );
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let client = client("https://crt.sh/");
        assert_eq!(
            client.endpoint(DataFormat::Json, "%.example.com&x").as_str(),
            "https://crt.sh/json?q=%25.example.com%26x"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = client("http://127.0.0.1:9000/mirror?stale=1");
        assert_eq!(
            client.endpoint(DataFormat::Csv, "a").as_str(),
            "http://127.0.0.1:9000/mirror/csv?q=a"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            CrtShClient::new("not a url", Duration::from_secs(1)),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            CrtShClient::new("mailto:someone@example.com", Duration::from_secs(1)),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_render_records() {
        let records = vec![
            CertificateRecord {
                common_name: Some("a.com".to_string()),
                name_value: Some("b.com".to_string()),
            },
            CertificateRecord::default(),
        ];
        assert_eq!(render_records(&records), "a.com\nb.com\n\n\n");
        assert_eq!(render_records(&[]), "");
    }

    #[test]
    fn test_summary_outcome() {
        let mut summary = ExtractSummary {
            subdomain_file: PathBuf::from("fetchcrtSubDomain_a.txt"),
            record_count: 1,
            raw_downloads: vec![
                (DataFormat::Json, Ok(PathBuf::from("fetchcrt__a.json"))),
                (DataFormat::Csv, Ok(PathBuf::from("fetchcrt__a.csv"))),
            ],
        };
        assert_eq!(summary.outcome(), RunOutcome::Completed);

        summary.raw_downloads[1].1 = Err(FetchError::Status(503));
        assert_eq!(summary.outcome(), RunOutcome::Failed);
        assert_eq!(crate::cli::exit_status(summary.outcome(), true), 1);
        assert_eq!(crate::cli::exit_status(summary.outcome(), false), 0);
    }

    #[test]
    fn test_output_path() {
        let plain = client("https://crt.sh");
        assert_eq!(plain.output_path("x.txt"), PathBuf::from("x.txt"));

        let nested = client("https://crt.sh").with_output_dir("/tmp/out");
        assert_eq!(nested.output_path("x.txt"), PathBuf::from("/tmp/out/x.txt"));
    }
}
