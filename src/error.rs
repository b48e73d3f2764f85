// src/error.rs
//! Tagged failure types returned by the fetch, download and extraction operations

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single crt.sh request
#[derive(Debug, Error)]
pub enum FetchError {
    /// The service answered with something other than 200
    #[error("HTTP Status Code: {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode certificate records: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid base URL {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// HTTP status carried by the failure, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// Failure of one target in a batch download
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP Status Code: {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure while scanning the downloaded range files
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not read directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
