// src/lib.rs
// Library interface for crt-recon
pub mod cli;
pub mod config;
pub mod console;
pub mod crtsh;
pub mod error;
pub mod logging;
pub mod progress;
pub mod sni;
