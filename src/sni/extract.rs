// src/sni/extract.rs
//! Domain extraction from SNI range files
//!
//! Each line of a range file looks like `1.2.3.0/24 -- [a.example.com b.example.com]`.
//! Only the first bracketed group of a line is considered.

use crate::error::ExtractError;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

static BRACKET_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("bracket pattern is valid"));

const RANGE_FILE_EXTENSION: &str = ".txt";

/// Distinct domain tokens, iterated in byte-lexicographic order
pub type DomainSet = BTreeSet<String>;

/// A range file that was skipped
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ExtractError,
}

/// Result of scanning a directory of range files
#[derive(Debug, Default)]
pub struct ExtractionReport {
    pub domains: DomainSet,
    pub files_scanned: usize,
    pub failures: Vec<FileFailure>,
}

/// Tokens from the first bracketed group of `line`, if any
pub fn domains_in_line(line: &str) -> impl Iterator<Item = &str> {
    BRACKET_GROUP
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|group| group.as_str())
        .unwrap_or("")
        .split_whitespace()
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Collect the domains of a single file. Nothing is returned if any read fails.
///
/// `\n`, `\r\n` and a bare `\r` all end a line.
pub fn extract_domains_from_file(path: &Path) -> Result<DomainSet, ExtractError> {
    let file_err = |source| ExtractError::File {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(file_err)?);
    let mut domains = DomainSet::new();

    for line in reader.lines() {
        let line = line.map_err(file_err)?;
        for segment in line.split('\r') {
            domains.extend(domains_in_line(segment).map(str::to_owned));
        }
    }

    Ok(domains)
}

/// Scan every `.txt` file directly inside `directory` and union their domains.
///
/// Unreadable files are recorded in the report and skipped; only a failure to
/// list the directory itself is an error.
pub fn extract_domains_from_dir(directory: &Path) -> Result<ExtractionReport, ExtractError> {
    let entries = fs::read_dir(directory).map_err(|source| ExtractError::Directory {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_range_file(path))
        .collect();
    paths.sort();

    let mut report = ExtractionReport::default();

    for path in paths {
        match extract_domains_from_file(&path) {
            Ok(domains) => {
                debug!("{} domains in {}", domains.len(), path.display());
                report.files_scanned += 1;
                report.domains.extend(domains);
            }
            Err(error) => {
                warn!("Skipping {}: {}", path.display(), error);
                report.failures.push(FileFailure { path, error });
            }
        }
    }

    Ok(report)
}

fn is_range_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.ends_with(RANGE_FILE_EXTENSION))
            .unwrap_or(false)
}

/// Write one domain per line, replacing any previous contents
pub fn write_domains(path: &Path, domains: &DomainSet) -> Result<(), ExtractError> {
    let mut contents = String::new();
    for domain in domains {
        contents.push_str(domain);
        contents.push('\n');
    }

    fs::write(path, contents).map_err(|source| ExtractError::Write {
        path: path.to_path_buf(),
        source,
    })
}
