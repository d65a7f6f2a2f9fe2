use anyhow::{Context, bail};
use serde::Deserialize;

/// Default port used when no configuration is supplied. High enough to stay
/// clear of anything privileged on the host device.
pub const DEFAULT_PORT: u16 = 8999;

/// Default worker count. The server is meant for a local LAN and a handful of
/// devices, so the pool is small.
pub const DEFAULT_WORKER_COUNT: usize = 3;

const DEFAULT_AGENT: &str = "AndroidHTTPServer";

/// Server configuration.
///
/// Loaded from a YAML file (path taken from the `COURIER_CONFIG` environment
/// variable) or built from defaults when no file is configured. All fields
/// are optional in the file; missing ones fall back to the defaults below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Interface to bind, e.g. "0.0.0.0" or "127.0.0.1".
    pub listen_addr: String,
    /// Port to bind. 0 asks the OS for an ephemeral port.
    pub port: u16,
    /// Maximum number of concurrently handled connections.
    pub worker_count: usize,
    /// Agent label reported in the `Server` header and the server-info body.
    pub server_agent: String,
    /// Device model placeholder reported in the server-info body.
    pub device_model: String,
    /// Device OS version placeholder reported in the server-info body.
    pub device_version: String,
    /// Dump request lines and per-request details at debug level.
    pub debug: bool,
    /// Seconds to wait for in-flight handlers on shutdown before aborting them.
    pub shutdown_grace_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            worker_count: DEFAULT_WORKER_COUNT,
            server_agent: DEFAULT_AGENT.to_string(),
            device_model: "unknown".to_string(),
            device_version: "unknown".to_string(),
            debug: false,
            shutdown_grace_secs: 5,
        }
    }
}

impl Config {
    /// Load configuration from the file named by `COURIER_CONFIG`, or return
    /// the defaults when the variable is not set.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("COURIER_CONFIG") {
            Ok(path) => Self::from_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Load and validate configuration from a YAML file.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        let config: Self = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {path}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Check configured values, rejecting what the server cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.port != 0 && self.port < 1024 {
            bail!("port must not be in reserved range (< 1024)");
        }
        if self.worker_count == 0 {
            bail!("worker_count must be greater than zero");
        }
        Ok(())
    }

    /// Address string suitable for binding, e.g. "0.0.0.0:8999".
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.listen_addr, self.port)
    }
}
