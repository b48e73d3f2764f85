// src/config.rs

use crate::sni::targets::{default_targets, DownloadTarget};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct CrtShConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,  // Working directory when unset
}

fn default_base_url() -> String { "https://crt.sh".to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl Default for CrtShConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            output_dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SniConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_domains_file")]
    pub domains_file: PathBuf,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_targets")]
    pub targets: Vec<DownloadTarget>,  // Replaces the built-in provider list
}

fn default_output_dir() -> PathBuf { PathBuf::from("downloads") }
fn default_domains_file() -> PathBuf { PathBuf::from("domainNames.txt") }
fn default_chunk_size() -> usize { 1024 }

impl Default for SniConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            domains_file: default_domains_file(),
            chunk_size: default_chunk_size(),
            targets: default_targets(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String { "warn".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub crtsh: CrtShConfig,
    #[serde(default)]
    pub sni: SniConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&contents)?;
        if cfg.sni.chunk_size == 0 {
            anyhow::bail!("sni.chunk_size must be greater than 0");
        }
        Ok(cfg)
    }

    /// Load from `path` when given, otherwise fall back to the built-in defaults
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
