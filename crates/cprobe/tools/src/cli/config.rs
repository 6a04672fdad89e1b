// CProbe
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Tool configuration
//!
//! Loaded from a TOML file named on the command line, else from
//! `$CPROBE_CONFIG`, else built-in defaults. Every section and field is
//! optional.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use cprobe_analysis::OptimizerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::Level;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "CPROBE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
    pub optimizer: OptimizerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string() }
    }
}

/// How pass results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compact JSON, one document per line
    Json,
    /// Indented JSON
    #[default]
    Pretty,
    /// Plain text
    Text,
}

impl ToolConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))?;
        config.log_level()?;
        Ok(config)
    }

    /// Resolve the effective configuration from the command line and environment
    pub fn resolve_config(cli_config: Option<PathBuf>) -> Result<Self> {
        Self::resolve_from(cli_config, std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Resolve with an explicit environment value; the command line wins
    pub fn resolve_from(cli_config: Option<PathBuf>, env_config: Option<PathBuf>) -> Result<Self> {
        match cli_config.or(env_config) {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// The configured log level
    pub fn log_level(&self) -> Result<Level> {
        Level::from_str(self.logging.level.trim()).map_err(|_| anyhow::anyhow!("Invalid log level: {}", self.logging.level))
    }
}

/// Pick the log level: `-v` flags first, then the configured level
pub fn resolve_log_level(verbosity: u8, config: &ToolConfig) -> Result<Level> {
    match verbosity {
        0 => config.log_level(),
        1 => Ok(Level::DEBUG),
        2 => Ok(Level::TRACE),
        n => bail!("Too many -v flags ({n}); at most two are supported"),
    }
}
