use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{Result, StrutscanError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scan settings
    pub scan: ScanConfig,

    /// Report output settings
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Root directory of the source tree to inventory
    pub base_dir: PathBuf,

    /// Lowercase substring identifying routing configuration files
    /// (combined with a `.xml` suffix)
    #[serde(default = "default_routing_marker")]
    pub routing_file_marker: String,

    /// File suffixes scanned for frontend path references
    #[serde(default = "default_frontend_suffixes")]
    pub frontend_suffixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Destination of the generated workbook
    pub output_path: PathBuf,
}

fn default_routing_marker() -> String {
    "struts".to_string()
}

fn default_frontend_suffixes() -> Vec<String> {
    vec!["jsp".to_string(), "html".to_string(), "js".to_string()]
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            StrutscanError::Config(format!(
                "cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: Config =
            toml::from_str(&content).map_err(|e| StrutscanError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Resolve the effective configuration from an optional file plus CLI
    /// overrides. A config file is required unless both the scan root and
    /// the output path are given on the command line.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let loaded = match &cli.config {
            Some(path) => Some(Self::load(path)?),
            None => {
                let candidates = ["strutscan.toml", ".strutscan.toml"];
                match candidates.iter().find(|c| Path::new(c).exists()) {
                    Some(c) => Some(Self::load(c)?),
                    None => None,
                }
            }
        };

        let mut config = match loaded {
            Some(config) => config,
            None => match (&cli.root, &cli.output) {
                (Some(root), Some(output)) => Config {
                    scan: ScanConfig {
                        base_dir: root.clone(),
                        routing_file_marker: default_routing_marker(),
                        frontend_suffixes: default_frontend_suffixes(),
                    },
                    report: ReportConfig {
                        output_path: output.clone(),
                    },
                },
                _ => {
                    return Err(StrutscanError::Config(
                        "no configuration file found; pass --config, or both --root and --output"
                            .to_string(),
                    ));
                }
            },
        };
        if let Some(root) = &cli.root {
            config.scan.base_dir = root.clone();
        }
        if let Some(output) = &cli.output {
            config.report.output_path = output.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the required settings before any scanning starts
    pub fn validate(&self) -> Result<()> {
        if self.scan.base_dir.as_os_str().is_empty() {
            return Err(StrutscanError::Config(
                "scan.base_dir must not be empty".to_string(),
            ));
        }
        if self.report.output_path.as_os_str().is_empty() {
            return Err(StrutscanError::Config(
                "report.output_path must not be empty".to_string(),
            ));
        }
        if !self.scan.base_dir.is_dir() {
            return Err(StrutscanError::Config(format!(
                "scan root does not exist or is not a directory: {}",
                self.scan.base_dir.display()
            )));
        }
        Ok(())
    }
}
