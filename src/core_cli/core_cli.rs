use clap::Parser;
use thiserror::Error;

use crate::constants::{MAX_PORT, PRIVILEGED_PORT_FLOOR};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "ftserved", about = "A two-socket file transfer server written in Rust.")]
pub struct Cli {
    /// Port to listen on for control connections (1024-65535)
    pub port: String,

    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory served to clients, overrides the configuration file
    #[arg(short, long)]
    pub root: Option<String>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StartupError {
    #[error("invalid port '{0}' (numeric value between 1024 and 65535 required)")]
    InvalidPort(String),
}

/// Validates the listening-port argument. The port is taken as a string
/// so that a non-numeric value reports the same startup error as an
/// out-of-range one.
pub fn parse_port(arg: &str) -> Result<u16, StartupError> {
    let port: u32 = arg
        .parse()
        .map_err(|_| StartupError::InvalidPort(arg.to_string()))?;
    if !(u32::from(PRIVILEGED_PORT_FLOOR)..=u32::from(MAX_PORT)).contains(&port) {
        return Err(StartupError::InvalidPort(arg.to_string()));
    }
    Ok(port as u16)
}
