// Test configuration loading
use crt_recon::config::Config;
use std::path::{Path, PathBuf};

#[test]
fn test_load_test_config() {
    let config_path = Path::new("tests/test_config.toml");
    let config = Config::from_file(config_path).expect("Failed to load test config");

    // Verify crt.sh config
    assert_eq!(config.crtsh.base_url, "http://127.0.0.1:8080");
    assert_eq!(config.crtsh.timeout_secs, 10);
    assert_eq!(config.crtsh.output_dir, None);

    // Verify SNI config
    assert_eq!(config.sni.output_dir, PathBuf::from("mirror"));
    assert_eq!(config.sni.domains_file, PathBuf::from("domains.txt"));
    assert_eq!(config.sni.chunk_size, 1024);

    // Targets replace the built-in list
    assert_eq!(config.sni.targets.len(), 2);
    assert_eq!(config.sni.targets[0].filename, "amazon_ipv4_merged_sni.txt");
    assert_eq!(config.sni.targets[0].label_color(), Some(colored::Color::Green));
    assert_eq!(config.sni.targets[1].color, None);
    assert_eq!(config.sni.targets[1].label, "Downloading google_ipv4_merged_sni.txt");

    // Verify logging config
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_target_missing_url_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[[sni.targets]]\nfilename = \"a.txt\"\nlabel = \"a\"\n").unwrap();

    assert!(Config::from_file(&path).is_err());
}
