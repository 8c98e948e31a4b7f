mod core_cli;

pub use core_cli::{parse_port, Cli, StartupError};
