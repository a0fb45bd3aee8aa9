//! Monitor configuration.
//!
//! A small YAML file holding the printer connection settings:
//!
//! ```yaml
//! printer:
//!   host: 192.168.4.31
//! ```
//!
//! The path comes from the first CLI argument, then `CREALITY_CONFIG`,
//! then `./creality.yaml`. `CREALITY_HOST` overrides the configured host
//! for containerized runs.

use std::env;
use std::path::{Path, PathBuf};

use creality_core::PrinterConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "creality.yaml";

/// Errors loading the monitor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML in {path}: {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Root of the monitor's YAML config file.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Printer connection settings
    pub printer: PrinterConfig,
}

/// Loads configuration from argv/env and applies overrides.
pub fn load() -> Result<MonitorConfig, ConfigError> {
    let path = env::args()
        .nth(1)
        .or_else(|| env::var("CREALITY_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let mut config = load_file(Path::new(&path))?;
    if let Ok(host) = env::var("CREALITY_HOST") {
        config.printer.host = host;
    }
    Ok(config)
}

/// Parses one YAML config file.
pub fn load_file(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&raw).map_err(|source| ConfigError::ParseYaml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_minimal_config_fills_default_ports() {
        let file = write_config("printer:\n  host: 192.168.4.31\n");
        let config = load_file(file.path()).unwrap();
        assert_eq!(config.printer.host, "192.168.4.31");
        assert_eq!(config.printer.port, 9999);
        assert_eq!(config.printer.ws_port, 9999);
        assert_eq!(config.printer.camera_port, 8080);
    }

    #[test]
    fn test_full_config_overrides_every_port() {
        let file = write_config(
            "printer:\n  host: printer.local\n  port: 8000\n  ws_port: 7125\n  camera_port: 8081\n",
        );
        let config = load_file(file.path()).unwrap();
        assert_eq!(config.printer.host, "printer.local");
        assert_eq!(config.printer.port, 8000);
        assert_eq!(config.printer.ws_port, 7125);
        assert_eq!(config.printer.camera_port, 8081);
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = load_file(Path::new("/nonexistent/creality.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        let file = write_config("printer: [not, a, map\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseYaml { .. }));
        assert!(err.to_string().contains("parse YAML"));
    }

    #[test]
    fn test_missing_host_is_a_parse_error() {
        let file = write_config("printer: {}\n");
        assert!(matches!(
            load_file(file.path()),
            Err(ConfigError::ParseYaml { .. })
        ));
    }
}
