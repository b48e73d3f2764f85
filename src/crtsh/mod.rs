// src/crtsh/mod.rs
pub mod client;
pub mod types;

pub use client::{CrtShClient, ExtractSummary};
pub use types::{CertificateRecord, DataFormat};
