//! Server config loader (strict parsing).
//!
//! All fields have defaults; an absent config file is equivalent to an
//! empty one. Defaults reproduce the classic benchmark setup: port 80,
//! "Hello" served as application/json, one worker per core.

use serde::Deserialize;
use std::fs;

use crate::error::{Error, Result};

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen port (0 = ephemeral, chosen by the kernel)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bind address
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Number of accept loops (0 = auto-detect)
    #[serde(default)]
    pub workers: usize,

    /// Response body returned for every request
    #[serde(default = "default_body")]
    pub body: String,

    /// Content-Type header of the response
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Size of the long-lived heap ballast in bytes (0 = disabled)
    #[serde(default)]
    pub ballast_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            hostname: default_hostname(),
            workers: 0,
            body: default_body(),
            content_type: default_content_type(),
            ballast_bytes: 0,
        }
    }
}

impl ServerConfig {
    /// Resolved worker count (auto-detect maps to the core count)
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.workers
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.content_type.is_empty() {
            return Err(Error::InvalidConfig("content_type must not be empty".into()));
        }
        if self.workers > 1024 {
            return Err(Error::InvalidConfig("workers must be at most 1024".into()));
        }
        Ok(())
    }
}

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| Error::ConfigRead(format!("{path}: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig =
        serde_yaml::from_str(s).map_err(|e| Error::ConfigParse(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

fn default_port() -> u16 {
    80
}
fn default_hostname() -> String {
    "0.0.0.0".into()
}
fn default_body() -> String {
    "Hello".into()
}
fn default_content_type() -> String {
    "application/json".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 80);
        assert_eq!(cfg.hostname, "0.0.0.0");
        assert_eq!(cfg.body, "Hello");
        assert_eq!(cfg.content_type, "application/json");
        assert_eq!(cfg.ballast_bytes, 0);
        assert!(cfg.effective_workers() >= 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_defaults() {
        let cfg = load_from_str("{}").unwrap();
        assert_eq!(cfg.port, 80);
        assert_eq!(cfg.body, "Hello");
    }

    #[test]
    fn test_parse_overrides() {
        let cfg = load_from_str(
            "port: 8080\nworkers: 4\nbody: '{\"message\":\"Hello World\"}'\nballast_bytes: 1048576\n",
        )
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.effective_workers(), 4);
        assert_eq!(cfg.body, r#"{"message":"Hello World"}"#);
        assert_eq!(cfg.ballast_bytes, 1 << 20);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(load_from_str("prot: 8080\n").is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(load_from_str("content_type: ''\n").is_err());
        assert!(load_from_str("workers: 4096\n").is_err());
    }
}
