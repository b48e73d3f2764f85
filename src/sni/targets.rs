// src/sni/targets.rs
use colored::Color;
use serde::Deserialize;

const SNI_RANGES_BASE: &str = "https://kaeferjaeger.gay/sni-ip-ranges";

/// One remote range file to mirror locally
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(from = "TargetEntry")]
pub struct DownloadTarget {
    /// Source URL
    pub url: String,

    /// File name inside the download directory
    pub filename: String,

    /// Text shown next to the progress bar
    pub label: String,

    /// Terminal color name for the label (e.g. "red", "bright cyan")
    pub color: Option<String>,
}

/// `[[sni.targets]]` table as written in the config file
#[derive(Deserialize)]
struct TargetEntry {
    url: String,
    filename: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

impl From<TargetEntry> for DownloadTarget {
    fn from(entry: TargetEntry) -> Self {
        let label = entry
            .label
            .unwrap_or_else(|| default_label(&entry.filename));
        Self {
            url: entry.url,
            filename: entry.filename,
            label,
            color: entry.color,
        }
    }
}

fn default_label(filename: &str) -> String {
    format!("Downloading {}", filename)
}

impl DownloadTarget {
    pub fn new(url: impl Into<String>, filename: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            label: label.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Parsed label color; unknown names fall back to no color
    pub fn label_color(&self) -> Option<Color> {
        self.color.as_deref().and_then(|c| c.parse::<Color>().ok())
    }
}

fn provider_target(provider: &str, file_prefix: &str, color: &str) -> DownloadTarget {
    let filename = format!("{}_ipv4_merged_sni.txt", file_prefix);
    let label = default_label(&filename);
    DownloadTarget::new(
        format!("{}/{}/ipv4_merged_sni.txt", SNI_RANGES_BASE, provider),
        filename,
        label,
    )
    .with_color(color)
}

/// Built-in provider list. Oracle is mirrored twice under two names.
pub fn default_targets() -> Vec<DownloadTarget> {
    vec![
        provider_target("oracle", "oracle", "red"),
        provider_target("amazon", "amazon", "green"),
        provider_target("digitalocean", "digitalocean", "blue"),
        provider_target("google", "google", "yellow"),
        provider_target("microsoft", "microsoft", "magenta"),
        provider_target("oracle", "oracle2", "cyan"),
    ]
}
