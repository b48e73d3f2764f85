// src/crtsh/types.rs
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

/// One entry of the crt.sh JSON listing. Other fields in the response are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CertificateRecord {
    #[serde(default)]
    pub common_name: Option<String>,

    /// SAN entries, newline separated by crt.sh
    #[serde(default)]
    pub name_value: Option<String>,
}

impl CertificateRecord {
    pub fn common_name(&self) -> &str {
        self.common_name.as_deref().unwrap_or("")
    }

    pub fn name_value(&self) -> &str {
        self.name_value.as_deref().unwrap_or("")
    }
}

/// Raw formats served by crt.sh
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataFormat {
    Json,
    Csv,
}

impl DataFormat {
    pub const ALL: [DataFormat; 2] = [DataFormat::Json, DataFormat::Csv];

    /// Endpoint path segment, also used as file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `fetchcrt__<query>.<ext>`
pub fn raw_filename(query: &str, format: DataFormat) -> String {
    format!("fetchcrt__{}.{}", query, format.as_str())
}

/// `fetchcrtSubDomain_<query>.txt`
pub fn subdomain_filename(query: &str) -> String {
    format!("fetchcrtSubDomain_{}.txt", query)
}
