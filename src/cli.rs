// src/cli.rs
use crate::crtsh::DataFormat;
use clap::Parser;
use colored::Colorize;
use std::fmt;
use std::path::PathBuf;

/// fetchcrt: fetch and process certificate data from crt.sh
#[derive(Parser, Debug, Clone)]
#[command(name = "fetchcrt")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct FetchCli {
    /// Company or subdomain to extract data for (e.g. google)
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,

    /// Format of the data to download. Use with -d.
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<DataFormat>,

    /// Download the data in the specified format (use with -f)
    #[arg(short = 'd', long = "download")]
    pub download: bool,

    /// Extract common_name and name_value into fetchcrtSubDomain_<query>.txt
    #[arg(short = 'e', long = "extract")]
    pub extract: bool,

    /// Show this help message and exit
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Path to TOML config file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Verbose logging (set log level to debug)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Exit non-zero on usage errors and failed requests
    #[arg(long = "strict")]
    pub strict: bool,
}

/// What a `fetchcrt` invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchAction {
    Help,
    Download { query: String, format: DataFormat },
    Extract { query: String },
    Usage(UsageError),
}

/// Invalid flag combinations, each with its own message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    MissingQuery,
    MissingFormat,
    MissingMode,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            UsageError::MissingQuery => "Error: The query (-q) argument is required.",
            UsageError::MissingFormat => {
                "Error: Please specify the file format (-f json or -f csv) for downloading."
            }
            UsageError::MissingMode => {
                "Error: Please specify either -d to download or -e to extract data."
            }
        };
        f.write_str(msg)
    }
}

impl FetchCli {
    /// Resolve flags into a single action. `-d` wins over `-e`.
    ///
    /// `no_arguments` is true when the program was started without any argument.
    pub fn action(&self, no_arguments: bool) -> FetchAction {
        if no_arguments || self.help {
            return FetchAction::Help;
        }

        let Some(query) = self.query.clone() else {
            return FetchAction::Usage(UsageError::MissingQuery);
        };

        if self.download {
            match self.format {
                Some(format) => FetchAction::Download { query, format },
                None => FetchAction::Usage(UsageError::MissingFormat),
            }
        } else if self.extract {
            FetchAction::Extract { query }
        } else {
            FetchAction::Usage(UsageError::MissingMode)
        }
    }

    /// Log level override from flags
    pub fn log_level(&self) -> Option<&str> {
        self.verbose.then_some("debug")
    }
}

pub const EXIT_FAILED: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

/// How a run ended, before it is mapped to a process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// A request, download or file read failed
    Failed,
    Usage,
}

/// Process exit status for `outcome`. Without `--strict` every run exits 0.
pub fn exit_status(outcome: RunOutcome, strict: bool) -> u8 {
    if !strict {
        return 0;
    }

    match outcome {
        RunOutcome::Completed => 0,
        RunOutcome::Failed => EXIT_FAILED,
        RunOutcome::Usage => EXIT_USAGE,
    }
}

/// sni-domains: mirror SNI IP-range files and extract their domains
#[derive(Parser, Debug, Clone)]
#[command(name = "sni-domains")]
#[command(author, version, about, long_about = None)]
pub struct SniCli {
    /// Path to TOML config file (targets, output paths)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Disable progress bars
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Verbose logging (set log level to debug)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Exit non-zero when any download or file read failed
    #[arg(long = "strict")]
    pub strict: bool,
}

impl SniCli {
    pub fn should_show_progress(&self) -> bool {
        !self.no_progress
    }

    pub fn log_level(&self) -> Option<&str> {
        self.verbose.then_some("debug")
    }
}

/// Usage page for `fetchcrt`
pub fn fetch_help(use_colors: bool) -> String {
    let heading = |s: &str| {
        if use_colors {
            s.magenta().bold().to_string()
        } else {
            s.to_string()
        }
    };
    let options = |s: &str| {
        if use_colors {
            s.green().bold().to_string()
        } else {
            s.to_string()
        }
    };
    let examples = |s: &str| {
        if use_colors {
            s.blue().bold().to_string()
        } else {
            s.to_string()
        }
    };
    let command = |s: &str| {
        if use_colors {
            s.cyan().to_string()
        } else {
            s.to_string()
        }
    };

    format!(
        "
{usage}
  fetchcrt [-h] -q QUERY [-f {{json,csv}}] [-d] [-e]

{description}
  Fetch and process certificate data from crt.sh

{options}
  -h, --help            Show this help message and exit.
  -q QUERY, --query QUERY
                        Specify the company or subdomain you want to extract data for (e.g., google).
  -f {{json,csv}}, --format {{json,csv}}
                        Specify the format of the data to download ('json' or 'csv'). Use this option with -d.
  -d, --download        Download the data in the specified format (use with -f).
  -e, --extract         Extract `common_name` and `name_value` from the data and store them in 'fetchcrtSubDomain_<query>.txt'.
                        It also downloads both JSON and CSV files.
  -c PATH, --config PATH
                        Read settings from a TOML config file.
  -v, --verbose         Enable debug logging on stderr.
  --strict              Exit with a non-zero status on usage errors and failed requests.

{examples}
  1. Download a JSON file:
     {ex1}

  2. Download a CSV file:
     {ex2}

  3. Extract specific fields (`common_name` and `name_value`) and save to 'fetchcrtSubDomain_google.txt':
     {ex3}
",
        usage = heading("Usage:"),
        description = heading("Description:"),
        options = options("Options:"),
        examples = examples("Examples:"),
        ex1 = command("fetchcrt -q google -f json -d"),
        ex2 = command("fetchcrt -q google -f csv -d"),
        ex3 = command("fetchcrt -q google -e"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch(args: &[&str]) -> FetchAction {
        let cli = FetchCli::parse_from(args);
        cli.action(args.len() == 1)
    }

    #[test]
    fn test_no_arguments_shows_help() {
        assert_eq!(fetch(&["fetchcrt"]), FetchAction::Help);
    }

    #[test]
    fn test_help_flag_wins() {
        assert_eq!(fetch(&["fetchcrt", "-q", "google", "-d", "-h"]), FetchAction::Help);
        assert_eq!(fetch(&["fetchcrt", "--help"]), FetchAction::Help);
    }

    #[test]
    fn test_download_action() {
        assert_eq!(
            fetch(&["fetchcrt", "-q", "google", "-f", "json", "-d"]),
            FetchAction::Download {
                query: "google".to_string(),
                format: DataFormat::Json,
            }
        );
        assert_eq!(
            fetch(&["fetchcrt", "--query", "google", "--format", "csv", "--download"]),
            FetchAction::Download {
                query: "google".to_string(),
                format: DataFormat::Csv,
            }
        );
    }

    #[test]
    fn test_download_takes_precedence_over_extract() {
        assert_eq!(
            fetch(&["fetchcrt", "-q", "google", "-f", "csv", "-d", "-e"]),
            FetchAction::Download {
                query: "google".to_string(),
                format: DataFormat::Csv,
            }
        );
    }

    #[test]
    fn test_extract_action() {
        assert_eq!(
            fetch(&["fetchcrt", "-q", "google", "-e"]),
            FetchAction::Extract { query: "google".to_string() }
        );
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(
            fetch(&["fetchcrt", "-d", "-f", "json"]),
            FetchAction::Usage(UsageError::MissingQuery)
        );
        assert_eq!(
            fetch(&["fetchcrt", "-q", "google", "-d"]),
            FetchAction::Usage(UsageError::MissingFormat)
        );
        assert_eq!(
            fetch(&["fetchcrt", "-q", "google"]),
            FetchAction::Usage(UsageError::MissingMode)
        );
    }

    #[test]
    fn test_usage_messages_are_distinct() {
        let messages = [
            UsageError::MissingQuery.to_string(),
            UsageError::MissingFormat.to_string(),
            UsageError::MissingMode.to_string(),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(FetchCli::try_parse_from(["fetchcrt", "-q", "a", "-f", "xml", "-d"]).is_err());
    }

    #[test]
    fn test_fetch_log_level() {
        assert_eq!(FetchCli::parse_from(["fetchcrt", "-v"]).log_level(), Some("debug"));
        assert_eq!(FetchCli::parse_from(["fetchcrt"]).log_level(), None);
    }

    #[test]
    fn test_sni_defaults() {
        let cli = SniCli::parse_from(["sni-domains"]);
        assert!(cli.config.is_none());
        assert!(cli.should_show_progress());
        assert!(!cli.strict);
        assert_eq!(cli.log_level(), None);
    }

    #[test]
    fn test_sni_flags() {
        let cli = SniCli::parse_from(["sni-domains", "-c", "ranges.toml", "--no-progress", "-v"]);
        assert_eq!(cli.config, Some(PathBuf::from("ranges.toml")));
        assert!(!cli.should_show_progress());
        assert_eq!(cli.log_level(), Some("debug"));
    }

    #[test]
    fn test_exit_status_default_mode_always_zero() {
        assert_eq!(exit_status(RunOutcome::Completed, false), 0);
        assert_eq!(exit_status(RunOutcome::Usage, false), 0);
        assert_eq!(exit_status(RunOutcome::Failed, false), 0);
    }

    #[test]
    fn test_exit_status_strict() {
        assert_eq!(exit_status(RunOutcome::Completed, true), 0);
        assert_eq!(exit_status(RunOutcome::Usage, true), EXIT_USAGE);
        assert_eq!(exit_status(RunOutcome::Failed, true), EXIT_FAILED);
        assert_eq!(EXIT_USAGE, 2);
        assert_eq!(EXIT_FAILED, 1);
    }

    #[test]
    fn test_strict_flag_parsed() {
        assert!(FetchCli::parse_from(["fetchcrt", "-q", "a", "--strict"]).strict);
        assert!(SniCli::parse_from(["sni-domains", "--strict"]).strict);
    }

    #[test]
    fn test_plain_help_text() {
        let help = fetch_help(false);
        assert!(help.contains("fetchcrt [-h] -q QUERY [-f {json,csv}] [-d] [-e]"));
        assert!(help.contains("fetchcrt -q google -e"));
    }
}
