//! Configuration file management
//!
//! Optional TOML file at `~/.presto/config.toml`. Every key has a default and a
//! missing file means all defaults. Command-line flags override the file.
//!
//! # Configuration Format
//!
//! ```toml
//! [server]
//! timeout = 60              # Request timeout in seconds (0 = no limit)
//! connection_timeout = 10   # TCP connect timeout in seconds
//!
//! [ui]
//! format = "tabular"        # tabular, tsv
//! ```

use presto_link::PrestoLinkTimeouts;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{CLIError, Result};
use crate::formatter::OutputFormat;

/// Location used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "~/.presto/config.toml";

/// CLI configuration loaded from TOML file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CLIConfiguration {
    /// Coordinator request settings
    pub server: Option<ServerConfig>,

    /// Output preferences
    pub ui: Option<UIConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UIConfig {
    /// Output format: tabular, tsv
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_timeout() -> u64 {
    PrestoLinkTimeouts::default().request_timeout.as_secs()
}

fn default_connection_timeout() -> u64 {
    PrestoLinkTimeouts::default().connection_timeout.as_secs()
}

pub fn expand_config_path(path: &Path) -> PathBuf {
    let path_str = path.to_str().unwrap_or(DEFAULT_CONFIG_PATH);
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(rest);
        }
    }
    path.to_path_buf()
}

impl CLIConfiguration {
    /// Load configuration from file
    ///
    /// Returns default configuration if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        let expanded_path = expand_config_path(path);
        let path = &expanded_path;

        if !path.exists() {
            log::debug!("[CONFIG] No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CLIError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;

        let config: CLIConfiguration = toml::from_str(&contents)?;
        log::debug!("[CONFIG] Loaded {}", path.display());
        Ok(config)
    }

    pub fn resolved_server(&self) -> ServerConfig {
        self.server.clone().unwrap_or(ServerConfig {
            timeout: default_timeout(),
            connection_timeout: default_connection_timeout(),
        })
    }

    pub fn resolved_format(&self) -> OutputFormat {
        self.ui.as_ref().map(|ui| ui.format).unwrap_or_default()
    }

    /// Build link timeouts, with `timeout_override` (seconds) taking precedence
    /// over the file's request timeout.
    pub fn to_timeouts(&self, timeout_override: Option<u64>) -> PrestoLinkTimeouts {
        let server = self.resolved_server();
        PrestoLinkTimeouts::builder()
            .connection_timeout_secs(server.connection_timeout)
            .request_timeout_secs(timeout_override.unwrap_or(server.timeout))
            .build()
    }
}
