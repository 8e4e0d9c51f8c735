pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::Domain;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use cli::CliConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;

/// 合併命令列、TOML 與預設值後的節點設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleConfig {
    pub bind: String,
    pub port: u16,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
    pub existence_upstream: Option<String>,
    pub ownership_upstream: Option<String>,
    pub activity_upstream: Option<String>,
    pub upstream_timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            read_timeout_secs: DEFAULT_TIMEOUT_SECS,
            write_timeout_secs: DEFAULT_TIMEOUT_SECS,
            existence_upstream: None,
            ownership_upstream: None,
            activity_upstream: None,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }
}

impl OracleConfig {
    /// 讀取 --config 指定的檔案（若有）並套用命令列覆蓋
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    /// 優先順序：命令列 > TOML > 預設值
    pub fn merge(cli: &CliConfig, file: TomlConfig) -> Self {
        let defaults = Self::default();
        let server = file.server.unwrap_or_default();
        let upstream = file.upstream.unwrap_or_default();

        Self {
            bind: cli.bind.clone().or(server.bind).unwrap_or(defaults.bind),
            port: cli.port.or(server.port).unwrap_or(defaults.port),
            read_timeout_secs: cli
                .read_timeout_secs
                .or(server.read_timeout_seconds)
                .unwrap_or(defaults.read_timeout_secs),
            write_timeout_secs: cli
                .write_timeout_secs
                .or(server.write_timeout_seconds)
                .unwrap_or(defaults.write_timeout_secs),
            existence_upstream: upstream.existence,
            ownership_upstream: upstream.ownership,
            activity_upstream: upstream.activity,
            upstream_timeout_secs: upstream
                .upstream_timeout_seconds
                .unwrap_or(defaults.upstream_timeout_secs),
        }
    }
}

impl ConfigProvider for OracleConfig {
    fn bind_address(&self) -> &str {
        &self.bind
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    fn upstream_endpoint(&self, domain: Domain) -> Option<&str> {
        match domain {
            Domain::Existence => self.existence_upstream.as_deref(),
            Domain::Ownership => self.ownership_upstream.as_deref(),
            Domain::Activity => self.activity_upstream.as_deref(),
        }
    }

    fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

impl Validate for OracleConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("server.port", self.port as u64, 1)?;
        validate_positive_number("server.read_timeout_seconds", self.read_timeout_secs, 1)?;
        validate_positive_number("server.write_timeout_seconds", self.write_timeout_secs, 1)?;
        validate_positive_number(
            "upstream.upstream_timeout_seconds",
            self.upstream_timeout_secs,
            1,
        )?;

        for domain in Domain::ALL {
            if let Some(endpoint) = self.upstream_endpoint(domain) {
                validate_url(&format!("upstream.{}", domain), endpoint)?;
            }
        }

        Ok(())
    }
}
