use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::constants::DEFAULT_CHUNK_SIZE;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the control listener binds to.
    pub bind_address: String,
    /// Directory served to clients, both for listings and file requests.
    pub root_dir: String,
    /// Size of the control scratch buffer and of each streamed file chunk.
    pub chunk_size: usize,
    /// Per-read deadline on the control stream, in seconds. Absent means
    /// a stalled peer stalls its own session indefinitely.
    pub read_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: String::from("0.0.0.0"),
            root_dir: String::from("."),
            chunk_size: DEFAULT_CHUNK_SIZE,
            read_timeout_secs: None,
        }
    }
}

/// Loads the configuration from an optional TOML file. No path means
/// built-in defaults; a path that cannot be read or parsed is a startup
/// failure.
pub fn load_config(path: Option<&str>) -> Result<Config> {
    let config = match path {
        None => Config::default(),
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read configuration file: {}", path))?;
            toml::from_str(&config_str)
                .with_context(|| format!("Failed to parse configuration file: {}", path))?
        }
    };
    ensure!(
        config.server.chunk_size > 0,
        "chunk_size must be greater than zero"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_no_file_given() {
        let config = load_config(None).unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.server.root_dir, ".");
        assert_eq!(config.server.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(config.server.read_timeout_secs.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nroot_dir = \"/srv/files\"").unwrap();
        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.server.root_dir, "/srv/files");
        assert_eq!(config.server.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        assert!(load_config(Some("/nonexistent/ftserved.conf")).is_err());
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nchunk_size = 0").unwrap();
        assert!(load_config(file.path().to_str()).is_err());
    }
}
