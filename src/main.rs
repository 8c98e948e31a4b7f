mod config;
mod constants;
mod core_cli;
mod core_protocol;
mod core_transfer;
mod helpers;
mod server;
mod session;

use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use std::io::Write;
use std::process;

use crate::core_cli::Cli;

#[tokio::main]
async fn main() {
    // Parse CLI arguments. Argument errors are startup failures and
    // exit 1 like the rest; --help and --version exit 0.
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    // Initialize the logger with a custom format
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let timestamp = buf.timestamp();
            writeln!(
                buf,
                "[{}] [{}] {}",
                timestamp,
                record.level(),
                record.args()
            )
        })
        .init();

    // Bad arguments, unreadable configuration and bind failures are all
    // startup errors: report and exit. Per-session trouble never gets here.
    if let Err(e) = run(args).await {
        eprintln!("ftserved: {:#}", e);
        process::exit(1);
    }
}

async fn run(args: Cli) -> Result<()> {
    let port = core_cli::parse_port(&args.port)?;

    let mut config = config::load_config(args.config.as_deref())?;
    if let Some(root) = args.root {
        config.server.root_dir = root;
    }

    server::run(port, config).await
}
